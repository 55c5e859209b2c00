// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - One short-lived handle per entity, borrowing the Store mutably
// - Foreign keys are resolved through Store::find, never through another repository's reads
// - Cascades and fan-out run inside Store::transaction
// - Updates merge onto a copy, validate the copy, then commit

pub mod class_repository;
pub mod professor_repository;
pub mod review_repository;
pub mod student_repository;
pub mod subject_repository;

#[cfg(test)]
mod cascade_tests;

pub use class_repository::ClassRepository;
pub use professor_repository::{ProfessorRepository, MISSING_PROFESSOR_AVERAGE};
pub use review_repository::{Clock, ReviewRepository, SystemClock};
pub use student_repository::StudentRepository;
pub use subject_repository::SubjectRepository;

use crate::db::{Record, Store};
use crate::domain::DomainError;
use crate::error::AppResult;

/// Merge a change onto a copy of the stored record, validate the copy and
/// only then write it over the live record.
pub(crate) fn merge_validate_apply<T, M, V>(
    store: &mut Store,
    key: i64,
    merge: M,
    validate: V,
) -> AppResult<()>
where
    T: Record,
    M: FnOnce(&mut T),
    V: FnOnce(&Store, &T) -> AppResult<()>,
{
    let mut candidate = store
        .find::<T>(key)
        .cloned()
        .ok_or_else(|| DomainError::not_found(T::ENTITY, key))?;

    merge(&mut candidate);
    validate(store, &candidate)?;

    if let Some(live) = store.find_mut::<T>(key) {
        *live = candidate;
    }
    Ok(())
}
