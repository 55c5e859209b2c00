// src/repositories/class_repository.rs
//
// Class persistence plus the cleanup helpers other repositories call during
// cascades. A class is unique on (subject, period, professor set).

use log::{debug, warn};

use super::{merge_validate_apply, ReviewRepository};
use crate::db::{Sequence, Store};
use crate::domain::shared::{push_unique, remove_value, validate_positive_key};
use crate::domain::{
    validate_class_shape, Class, ClassCode, ClassPatch, DomainError, Enrollment, NewClass,
    Professor, ProfessorId, Review, ReviewId, Student, Subject, SubjectCode,
};
use crate::error::AppResult;

pub struct ClassRepository<'a> {
    store: &'a mut Store,
}

impl<'a> ClassRepository<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Shape rules plus resolution of the subject, every professor and every
    /// enrolled student
    pub fn validate(&self, class: &Class) -> AppResult<()> {
        validate_class_references(&*self.store, class)
    }

    /// Whether a class with the same subject, period and professor set is stored
    pub fn exists(&self, data: &NewClass) -> bool {
        find_offering(&*self.store, data.subject_code, data.period, &data.professors_ids, None)
            .is_some()
    }

    pub fn create(&mut self, data: NewClass) -> AppResult<ClassCode> {
        let candidate = Class::new(self.store.peek_id(Sequence::Class)?, data);
        self.validate(&candidate)
            .inspect_err(|e| warn!("Class rejected: {}", e))?;

        if let Some(existing) = find_offering(
            &*self.store,
            candidate.subject_code,
            candidate.period,
            &candidate.professors_ids,
            None,
        ) {
            warn!("Class identical to {} already exists", existing);
            return Err(DomainError::Duplicate(format!(
                "class {} already offers subject {} in {} with the same professors",
                existing, candidate.subject_code, candidate.period
            ))
            .into());
        }

        let code = self.store.next_id(Sequence::Class)?;
        debug!("Creating class {} for subject {}", code, candidate.subject_code);
        self.store.insert(Class { code, ..candidate });
        Ok(code)
    }

    pub fn retrieve(&self, code: ClassCode) -> Option<&Class> {
        self.store.find(code)
    }

    pub fn retrieve_all(&self) -> &[Class] {
        self.store.all()
    }

    pub fn update(&mut self, code: ClassCode, patch: ClassPatch) -> AppResult<()> {
        merge_validate_apply::<Class, _, _>(
            self.store,
            code,
            |c| c.apply(patch),
            |store, c| {
                validate_class_references(store, c)?;
                let clash = find_offering(
                    store,
                    c.subject_code,
                    c.period,
                    &c.professors_ids,
                    Some(c.code),
                );
                if let Some(other) = clash {
                    return Err(DomainError::Duplicate(format!(
                        "class {} already has the same subject, period and professors",
                        other
                    ))
                    .into());
                }
                Ok(())
            },
        )
        .inspect_err(|e| warn!("Class {} update rejected: {}", code, e))
    }

    /// Delete the class together with the reviews that target it
    pub fn delete(&mut self, code: ClassCode) -> AppResult<()> {
        validate_positive_key("class code", code)?;
        if !self.store.contains::<Class>(code) {
            return Err(DomainError::not_found("class", code).into());
        }

        self.store
            .transaction("class delete", |store| delete_class_with_reviews(store, code))
    }

    // ------------------------------------------------------------------------
    // Cascade helpers
    // ------------------------------------------------------------------------

    /// Add `review_id` to the class's review list; already present is fine
    pub fn associate_review(&mut self, code: ClassCode, review_id: ReviewId) -> AppResult<()> {
        validate_positive_key("review id", review_id)?;
        let class = self
            .store
            .find_mut::<Class>(code)
            .ok_or_else(|| DomainError::missing("class", code))?;
        push_unique(&mut class.reviews_ids, review_id);
        Ok(())
    }

    /// Drop `review_id` from the class's review list; already absent is fine
    pub fn remove_review_reference(&mut self, code: ClassCode, review_id: ReviewId) -> AppResult<()> {
        let class = self
            .store
            .find_mut::<Class>(code)
            .ok_or_else(|| DomainError::not_found("class", code))?;
        remove_value(&mut class.reviews_ids, review_id);
        Ok(())
    }

    pub fn remove_student_from_all(&mut self, enrollment: Enrollment) {
        for class in self.store.all_mut::<Class>() {
            remove_value(&mut class.students_enrollments, enrollment);
        }
    }

    pub fn remove_professor_from_all(&mut self, id: ProfessorId) {
        for class in self.store.all_mut::<Class>() {
            remove_value(&mut class.professors_ids, id);
        }
    }

    /// Delete every class of `subject_code`, returning how many went
    pub fn delete_by_subject(&mut self, subject_code: SubjectCode) -> AppResult<usize> {
        validate_positive_key("subject code", subject_code)?;
        let codes: Vec<ClassCode> = self
            .retrieve_all()
            .iter()
            .filter(|c| c.subject_code == subject_code)
            .map(|c| c.code)
            .collect();

        for code in &codes {
            delete_class_with_reviews(self.store, *code)?;
        }
        Ok(codes.len())
    }
}

/// Code of a stored class with the same subject, period and professor set, other than `except`
fn find_offering(
    store: &Store,
    subject_code: SubjectCode,
    period: i64,
    professors_ids: &[ProfessorId],
    except: Option<ClassCode>,
) -> Option<ClassCode> {
    store
        .all::<Class>()
        .iter()
        .filter(|c| Some(c.code) != except)
        .find(|c| c.is_same_offering(subject_code, period, professors_ids))
        .map(|c| c.code)
}

fn validate_class_references(store: &Store, class: &Class) -> AppResult<()> {
    validate_class_shape(class)?;

    if !store.contains::<Subject>(class.subject_code) {
        return Err(DomainError::missing("subject", class.subject_code).into());
    }
    if let Some(id) = class
        .professors_ids
        .iter()
        .find(|id| !store.contains::<Professor>(**id))
    {
        return Err(DomainError::missing("professor", *id).into());
    }
    if let Some(enrollment) = class
        .students_enrollments
        .iter()
        .find(|e| !store.contains::<Student>(**e))
    {
        return Err(DomainError::missing("student", *enrollment).into());
    }
    Ok(())
}

fn delete_class_with_reviews(store: &mut Store, code: ClassCode) -> AppResult<()> {
    let targeting: Vec<ReviewId> = store
        .all::<Review>()
        .iter()
        .filter(|r| r.class_target_code == Some(code))
        .map(|r| r.id_aval)
        .collect();

    for review_id in targeting {
        ReviewRepository::new(&mut *store).delete(review_id)?;
    }
    store
        .remove::<Class>(code)
        .ok_or_else(|| DomainError::not_found("class", code))?;
    debug!("Deleted class {}", code);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, NewProfessor, ScheduleSlot, Weekday};
    use crate::repositories::ProfessorRepository;

    fn seeded() -> Store {
        let mut store = Store::in_memory();
        store.insert(Subject::new(1301, 4, "Modular"));
        let mut profs = ProfessorRepository::new(&mut store);
        profs.create(NewProfessor::new("A", Department::Inf)).unwrap();
        profs.create(NewProfessor::new("B", Department::Inf)).unwrap();
        store
    }

    fn offering(professors: Vec<ProfessorId>) -> NewClass {
        NewClass {
            subject_code: 1301,
            period: 20242,
            schedule: vec![ScheduleSlot::new(Weekday::Mon, 9, 11)],
            professors_ids: professors,
            students_enrollments: Vec::new(),
        }
    }

    #[test]
    fn test_create_assigns_code() {
        let mut store = seeded();
        let mut repo = ClassRepository::new(&mut store);

        let code = repo.create(offering(vec![1])).unwrap();

        assert_eq!(code, 1);
        let class = repo.retrieve(code).unwrap();
        assert_eq!(class.professors_ids, vec![1]);
        assert!(class.reviews_ids.is_empty());
    }

    #[test]
    fn test_identical_offering_rejected_in_any_order() {
        let mut store = seeded();
        let mut repo = ClassRepository::new(&mut store);
        repo.create(offering(vec![1, 2])).unwrap();

        assert!(repo.exists(&offering(vec![2, 1])));
        let err = repo.create(offering(vec![2, 1])).unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::Duplicate(_))));
        assert!(!repo.exists(&offering(vec![1])));
        assert_eq!(repo.create(offering(vec![1])).unwrap(), 2);
    }

    #[test]
    fn test_unresolved_references_rejected() {
        let mut store = seeded();
        let mut repo = ClassRepository::new(&mut store);

        let mut missing_subject = offering(vec![1]);
        missing_subject.subject_code = 4040;
        assert!(repo.create(missing_subject).is_err());
        assert!(repo.create(offering(vec![1, 99])).is_err());
        assert!(repo.create(offering(vec![])).is_err());

        let mut missing_student = offering(vec![1]);
        missing_student.students_enrollments = vec![123];
        assert!(repo.create(missing_student).is_err());
        assert!(repo.retrieve_all().is_empty());
    }

    #[test]
    fn test_update_cannot_collide_with_other_class() {
        let mut store = seeded();
        let mut repo = ClassRepository::new(&mut store);
        let first = repo.create(offering(vec![1])).unwrap();
        let second = repo.create(offering(vec![2])).unwrap();

        let collide = repo.update(
            second,
            ClassPatch {
                professors_ids: Some(vec![1]),
                ..Default::default()
            },
        );
        assert!(collide.is_err());

        repo.update(
            first,
            ClassPatch {
                schedule: Some(vec![ScheduleSlot::new(Weekday::Tue, 14, 16)]),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(repo.retrieve(first).unwrap().schedule[0].day, Weekday::Tue);
        assert_eq!(repo.retrieve(second).unwrap().professors_ids, vec![2]);
    }

    #[test]
    fn test_delete_absent_or_malformed_is_error() {
        let mut store = seeded();
        let mut repo = ClassRepository::new(&mut store);

        assert!(repo.delete(0).is_err());
        assert!(repo.delete(5).unwrap_err().is_not_found());
    }

    #[test]
    fn test_review_reference_helpers_are_idempotent() {
        let mut store = seeded();
        let mut repo = ClassRepository::new(&mut store);
        let code = repo.create(offering(vec![1])).unwrap();

        repo.associate_review(code, 3).unwrap();
        repo.associate_review(code, 3).unwrap();
        assert_eq!(repo.retrieve(code).unwrap().reviews_ids, vec![3]);

        repo.remove_review_reference(code, 3).unwrap();
        repo.remove_review_reference(code, 3).unwrap();
        assert!(repo.retrieve(code).unwrap().reviews_ids.is_empty());
        assert!(repo.associate_review(77, 3).is_err());
    }

    #[test]
    fn test_strip_professor_from_all_classes() {
        let mut store = seeded();
        let mut repo = ClassRepository::new(&mut store);
        let code = repo.create(offering(vec![1, 2])).unwrap();

        repo.remove_professor_from_all(2);
        assert_eq!(repo.retrieve(code).unwrap().professors_ids, vec![1]);
    }
}
