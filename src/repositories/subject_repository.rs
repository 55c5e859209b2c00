// src/repositories/subject_repository.rs
//
// Subject persistence. Deleting a subject removes its classes and strips the
// code from every student's and professor's subject list.

use log::{debug, warn};

use super::{merge_validate_apply, ClassRepository, ProfessorRepository, StudentRepository};
use crate::db::Store;
use crate::domain::shared::validate_positive_key;
use crate::domain::{validate_subject, DomainError, Subject, SubjectCode, SubjectPatch};
use crate::error::{AppError, AppResult};

pub struct SubjectRepository<'a> {
    store: &'a mut Store,
}

impl<'a> SubjectRepository<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    pub fn validate(&self, subject: &Subject) -> AppResult<()> {
        validate_subject(subject).map_err(AppError::Domain)
    }

    pub fn create(&mut self, subject: Subject) -> AppResult<()> {
        validate_subject(&subject).inspect_err(|e| warn!("Subject rejected: {}", e))?;

        if self.store.contains::<Subject>(subject.code) {
            warn!("Subject {} already exists", subject.code);
            return Err(DomainError::Duplicate(format!("subject {} already exists", subject.code)).into());
        }

        debug!("Creating subject {}", subject);
        self.store.insert(subject);
        Ok(())
    }

    pub fn retrieve(&self, code: SubjectCode) -> Option<&Subject> {
        self.store.find(code)
    }

    pub fn retrieve_all(&self) -> &[Subject] {
        self.store.all()
    }

    /// Succeeds when `subject` is valid and a subject with its code is stored
    pub fn exists(&self, subject: &Subject) -> AppResult<()> {
        validate_subject(subject)?;
        if !self.store.contains::<Subject>(subject.code) {
            return Err(DomainError::not_found("subject", subject.code).into());
        }
        Ok(())
    }

    pub fn update(&mut self, code: SubjectCode, patch: SubjectPatch) -> AppResult<()> {
        merge_validate_apply::<Subject, _, _>(
            self.store,
            code,
            |s| s.apply(patch),
            |_, s| validate_subject(s).map_err(AppError::Domain),
        )
        .inspect_err(|e| warn!("Subject {} update rejected: {}", code, e))
    }

    pub fn delete(&mut self, code: SubjectCode) -> AppResult<()> {
        validate_positive_key("subject code", code)?;
        if !self.store.contains::<Subject>(code) {
            return Err(DomainError::not_found("subject", code).into());
        }

        self.store.transaction("subject delete", |store| {
            let removed = ClassRepository::new(&mut *store).delete_by_subject(code)?;
            StudentRepository::new(&mut *store).remove_subject_from_all(code);
            ProfessorRepository::new(&mut *store).remove_subject_from_all(code);
            store.remove::<Subject>(code);

            debug!("Deleted subject {} and {} dependent classes", code, removed);
            Ok(())
        })
    }
}
