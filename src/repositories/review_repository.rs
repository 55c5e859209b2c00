// src/repositories/review_repository.rs
//
// Review persistence and the fan-out that keeps author, class and professor
// backreferences in step with the review table.

use chrono::Local;
use log::{debug, warn};

use super::{merge_validate_apply, ClassRepository, ProfessorRepository, StudentRepository};
use crate::db::{Sequence, Store};
use crate::domain::shared::validate_positive_key;
use crate::domain::{
    validate_review_shape, Class, DomainError, Enrollment, NewReview, Professor, Review, ReviewId,
    ReviewPatch, Student,
};
use crate::error::AppResult;

/// Source of review creation timestamps
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// Current time as an ISO-8601 string
    fn now(&self) -> String;
}

/// Local wall-clock time, microsecond precision, no offset
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string()
    }
}

pub struct ReviewRepository<'a> {
    store: &'a mut Store,
    clock: Box<dyn Clock>,
}

impl<'a> ReviewRepository<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: &'a mut Store, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
        }
    }

    /// Field rules, category rule, and resolution of the author and the target class
    pub fn validate(&self, review: &Review) -> AppResult<()> {
        validate_review_references(&*self.store, review)
    }

    /// Store the review, then link it to its author and, when it targets a
    /// class, to that class and every professor teaching it.
    pub fn create(&mut self, data: NewReview) -> AppResult<ReviewId> {
        let candidate = Review::new(self.store.peek_id(Sequence::Review)?, data, self.clock.now());
        self.validate(&candidate)
            .inspect_err(|e| warn!("Review rejected: {}", e))?;

        self.store.transaction("review create", |store| {
            let id = store.next_id(Sequence::Review)?;
            let review = Review {
                id_aval: id,
                ..candidate
            };
            let author = review.student_enrollment;
            let target = review.class_target_code;
            store.insert(review);

            StudentRepository::new(&mut *store).create_student_review(author, id)?;

            if let Some(class_code) = target {
                ClassRepository::new(&mut *store).associate_review(class_code, id)?;

                let professors = store
                    .find::<Class>(class_code)
                    .map(|c| c.professors_ids.clone())
                    .unwrap_or_default();
                for professor_id in professors {
                    if !store.contains::<Professor>(professor_id) {
                        warn!(
                            "Class {} lists unknown professor {}, skipping",
                            class_code, professor_id
                        );
                        continue;
                    }
                    ProfessorRepository::new(&mut *store).create_professor_review(professor_id, id)?;
                }
            }

            debug!("Created review {} by student {}", id, author);
            Ok(id)
        })
    }

    pub fn retrieve(&self, id: ReviewId) -> Option<&Review> {
        self.store.find(id)
    }

    /// Every review, or only those written by `author`
    pub fn retrieve_all(&self, author: Option<Enrollment>) -> Vec<&Review> {
        self.store
            .all::<Review>()
            .iter()
            .filter(|r| author.map_or(true, |a| r.student_enrollment == a))
            .collect()
    }

    /// Author and class target are fixed at creation and cannot be patched
    pub fn update(&mut self, id: ReviewId, patch: ReviewPatch) -> AppResult<()> {
        merge_validate_apply::<Review, _, _>(
            self.store,
            id,
            |r| r.apply(patch),
            validate_review_references,
        )
        .inspect_err(|e| warn!("Review {} update rejected: {}", id, e))
    }

    /// Unlink the review from its author, its class and every professor
    /// holding it, then remove it.
    pub fn delete(&mut self, id: ReviewId) -> AppResult<()> {
        validate_positive_key("review id", id)?;
        let target = self
            .retrieve(id)
            .ok_or_else(|| DomainError::not_found("review", id))?
            .class_target_code;

        self.store.transaction("review delete", |store| {
            StudentRepository::new(&mut *store).remove_review_from_all(id);

            if let Some(class_code) = target {
                if store.contains::<Class>(class_code) {
                    ClassRepository::new(&mut *store).remove_review_reference(class_code, id)?;
                }
            }
            ProfessorRepository::new(&mut *store).remove_review_from_all(id);

            store.remove::<Review>(id);
            debug!("Deleted review {}", id);
            Ok(())
        })
    }
}

fn validate_review_references(store: &Store, review: &Review) -> AppResult<()> {
    validate_review_shape(review)?;

    if !store.contains::<Student>(review.student_enrollment) {
        return Err(DomainError::missing("student", review.student_enrollment).into());
    }
    if let Some(code) = review.class_target_code {
        if !store.contains::<Class>(code) {
            return Err(DomainError::missing("class", code).into());
        }
    }
    Ok(())
}
