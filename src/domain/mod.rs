// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod class;
pub mod lookup;
pub mod professor;
pub mod review;
pub mod shared;
pub mod student;
pub mod subject;

// ============================================================================
// KEY TYPES
// ============================================================================

/// Student primary key (matrícula)
pub type Enrollment = i64;

/// Professor primary key, generated by the store
pub type ProfessorId = i64;

/// Subject primary key
pub type SubjectCode = i64;

/// Class primary key, generated by the store
pub type ClassCode = i64;

/// Review primary key, generated by the store
pub type ReviewId = i64;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Lookup tables
pub use lookup::{Course, Department};

// Shared constants and value types
pub use shared::{parse_schedule, ScheduleSlot, Weekday};

// Subject Domain
pub use subject::{validate_subject, Subject, SubjectPatch};

// Professor Domain
pub use professor::{validate_professor, NewProfessor, Professor, ProfessorPatch};

// Student Domain
pub use student::{validate_student, NewStudent, Student, StudentPatch};

// Class Domain
pub use class::{validate_class_shape, Class, ClassPatch, NewClass};

// Review Domain
pub use review::{
    validate_review_category, validate_review_shape, CategoryScope, NewReview, Review,
    ReviewCategory, ReviewPatch,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Wrong type or range on a required or key field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A foreign key failed to resolve
    #[error("{entity} {key} does not exist")]
    MissingReference { entity: &'static str, key: i64 },

    /// Key collision, identical class, taken username, repeated association
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: i64 },
}

impl DomainError {
    pub fn missing(entity: &'static str, key: i64) -> Self {
        DomainError::MissingReference { entity, key }
    }

    pub fn not_found(entity: &'static str, key: i64) -> Self {
        DomainError::NotFound { entity, key }
    }
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
