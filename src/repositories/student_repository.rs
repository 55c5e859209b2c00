// src/repositories/student_repository.rs
//
// Student persistence, subject history and authored-review associations.
// Deleting a student deletes every review they wrote and drops them from
// every class roster.

use log::{debug, warn};

use super::{merge_validate_apply, ClassRepository, ReviewRepository};
use crate::db::Store;
use crate::domain::shared::{push_unique, remove_value, replace_value, validate_positive_key};
use crate::domain::{
    validate_student, Course, DomainError, Enrollment, NewStudent, Review, ReviewId, Student,
    StudentPatch, Subject, SubjectCode,
};
use crate::error::{AppError, AppResult};

pub struct StudentRepository<'a> {
    store: &'a mut Store,
}

impl<'a> StudentRepository<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    pub fn validate(&self, student: &Student) -> AppResult<()> {
        validate_student(student).map_err(AppError::Domain)
    }

    /// Store a new student with empty histories and a private profile
    pub fn create(&mut self, data: NewStudent) -> AppResult<()> {
        let student = Student::new(data);
        validate_student(&student).inspect_err(|e| warn!("Student rejected: {}", e))?;

        if self.store.contains::<Student>(student.enrollment) {
            return Err(DomainError::Duplicate(format!(
                "enrollment {} already registered",
                student.enrollment
            ))
            .into());
        }
        if self.username_taken(&student.username, None) {
            return Err(DomainError::Duplicate(format!(
                "username '{}' already taken",
                student.username
            ))
            .into());
        }

        debug!("Creating student {}", student.enrollment);
        self.store.insert(student);
        Ok(())
    }

    pub fn retrieve(&self, enrollment: Enrollment) -> Option<&Student> {
        self.store.find(enrollment)
    }

    pub fn retrieve_all(&self) -> &[Student] {
        self.store.all()
    }

    /// Whether another student already uses `username`
    pub fn username_taken(&self, username: &str, except: Option<Enrollment>) -> bool {
        self.retrieve_all()
            .iter()
            .any(|s| s.username == username && Some(s.enrollment) != except)
    }

    /// Change only the course, given as its acronym
    pub fn update_course(&mut self, enrollment: Enrollment, course: &str) -> AppResult<()> {
        let course: Course = course.parse()?;
        self.update(
            enrollment,
            StudentPatch {
                course: Some(course),
                ..Default::default()
            },
        )
    }

    pub fn update(&mut self, enrollment: Enrollment, patch: StudentPatch) -> AppResult<()> {
        merge_validate_apply::<Student, _, _>(
            self.store,
            enrollment,
            |s| s.apply(patch),
            |store, s| {
                validate_student(s)?;
                let clash = store
                    .all::<Student>()
                    .iter()
                    .any(|other| other.username == s.username && other.enrollment != s.enrollment);
                if clash {
                    return Err(DomainError::Duplicate(format!(
                        "username '{}' already taken",
                        s.username
                    ))
                    .into());
                }
                Ok(())
            },
        )
        .inspect_err(|e| warn!("Student {} update rejected: {}", enrollment, e))
    }

    /// Delete the student, every review they authored (with its own
    /// cleanup) and their place in every class roster.
    pub fn delete(&mut self, enrollment: Enrollment) -> AppResult<()> {
        validate_positive_key("enrollment", enrollment)?;
        let student = self
            .retrieve(enrollment)
            .ok_or_else(|| DomainError::not_found("student", enrollment))?;

        let mut authored: Vec<ReviewId> = student.reviews.clone();
        for review in self.store.all::<Review>() {
            if review.student_enrollment == enrollment {
                push_unique(&mut authored, review.id_aval);
            }
        }

        self.store.transaction("student delete", |store| {
            for review_id in &authored {
                if store.contains::<Review>(*review_id) {
                    ReviewRepository::new(&mut *store).delete(*review_id)?;
                }
            }
            ClassRepository::new(&mut *store).remove_student_from_all(enrollment);
            store.remove::<Student>(enrollment);

            debug!(
                "Deleted student {} with {} authored reviews",
                enrollment,
                authored.len()
            );
            Ok(())
        })
    }

    // ------------------------------------------------------------------------
    // Subject history
    // ------------------------------------------------------------------------

    pub fn create_student_subject(&mut self, enrollment: Enrollment, code: SubjectCode) -> AppResult<()> {
        validate_positive_key("subject code", code)?;
        if !self.store.contains::<Subject>(code) {
            return Err(DomainError::missing("subject", code).into());
        }
        let student = self.find_mut(enrollment)?;
        if !push_unique(&mut student.subjects, code) {
            return Err(DomainError::Duplicate(format!(
                "student {} already took subject {}",
                enrollment, code
            ))
            .into());
        }
        Ok(())
    }

    pub fn student_took_subject(&self, enrollment: Enrollment, code: SubjectCode) -> bool {
        code > 0
            && self
                .retrieve(enrollment)
                .is_some_and(|s| s.subjects.contains(&code))
    }

    pub fn retrieve_student_subjects(&self, enrollment: Enrollment) -> Option<&[SubjectCode]> {
        self.retrieve(enrollment).map(|s| s.subjects.as_slice())
    }

    /// Rename `old` to `new` in every student's history. Fails when nobody had `old`.
    pub fn update_student_subjects(&mut self, old: SubjectCode, new: SubjectCode) -> AppResult<()> {
        validate_positive_key("old subject code", old)?;
        validate_positive_key("new subject code", new)?;
        if !self.store.contains::<Subject>(new) {
            return Err(DomainError::missing("subject", new).into());
        }

        let mut renamed = 0;
        for student in self.store.all_mut::<Student>() {
            if replace_value(&mut student.subjects, old, new) {
                renamed += 1;
            }
        }
        if renamed == 0 {
            return Err(DomainError::NotFound {
                entity: "student subject",
                key: old,
            }
            .into());
        }
        debug!("Renamed subject {} to {} for {} students", old, new, renamed);
        Ok(())
    }

    pub fn delete_student_subject(&mut self, enrollment: Enrollment, code: SubjectCode) -> AppResult<()> {
        validate_positive_key("subject code", code)?;
        let student = self.find_mut(enrollment)?;
        if !remove_value(&mut student.subjects, code) {
            return Err(DomainError::NotFound {
                entity: "student subject",
                key: code,
            }
            .into());
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Authored reviews
    // ------------------------------------------------------------------------

    pub fn create_student_review(&mut self, enrollment: Enrollment, review_id: ReviewId) -> AppResult<()> {
        validate_positive_key("review id", review_id)?;
        if !self.store.contains::<Review>(review_id) {
            return Err(DomainError::missing("review", review_id).into());
        }
        let student = self.find_mut(enrollment)?;
        if !push_unique(&mut student.reviews, review_id) {
            return Err(DomainError::Duplicate(format!(
                "review {} already associated with student {}",
                review_id, enrollment
            ))
            .into());
        }
        Ok(())
    }

    pub fn retrieve_student_reviews(&self, enrollment: Enrollment) -> Option<&[ReviewId]> {
        self.retrieve(enrollment).map(|s| s.reviews.as_slice())
    }

    pub fn retrieve_student_review(&self, enrollment: Enrollment, review_id: ReviewId) -> Option<ReviewId> {
        if review_id <= 0 {
            return None;
        }
        self.retrieve(enrollment)
            .filter(|s| s.reviews.contains(&review_id))
            .map(|_| review_id)
    }

    /// Membership guard; review fields change through the review repository
    pub fn update_student_review(&self, enrollment: Enrollment, review_id: ReviewId) -> AppResult<()> {
        self.retrieve_student_review(enrollment, review_id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("student review", review_id).into())
    }

    pub fn delete_student_review(&mut self, enrollment: Enrollment, review_id: ReviewId) -> AppResult<()> {
        validate_positive_key("review id", review_id)?;
        let student = self.find_mut(enrollment)?;
        if !remove_value(&mut student.reviews, review_id) {
            return Err(DomainError::not_found("student review", review_id).into());
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Cascade helpers
    // ------------------------------------------------------------------------

    pub(crate) fn remove_subject_from_all(&mut self, code: SubjectCode) {
        for student in self.store.all_mut::<Student>() {
            remove_value(&mut student.subjects, code);
        }
    }

    pub(crate) fn remove_review_from_all(&mut self, review_id: ReviewId) {
        for student in self.store.all_mut::<Student>() {
            remove_value(&mut student.reviews, review_id);
        }
    }

    fn find_mut(&mut self, enrollment: Enrollment) -> AppResult<&mut Student> {
        self.store
            .find_mut::<Student>(enrollment)
            .ok_or_else(|| DomainError::not_found("student", enrollment).into())
    }
}
