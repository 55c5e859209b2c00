// src/lib.rs
// Campus Reviews - academic records and peer reviews for course evaluation
//
// Architecture:
// - Domain-centric: entities, lookup tables and invariants live in `domain`
// - One in-memory Store holds every collection; repositories borrow it per operation
// - Explicit: foreign keys resolve at write time, cascades run as one unit
// - Snapshot persistence: the whole store is loaded and saved as one JSON document

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logger;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    parse_schedule,
    validate_class_shape,
    validate_professor,
    validate_review_category,
    validate_review_shape,
    validate_student,
    validate_subject,
    CategoryScope,
    // Class
    Class,
    ClassCode,
    ClassPatch,
    // Lookup tables
    Course,
    Department,
    DomainError,
    DomainResult,
    // Student
    Enrollment,
    NewClass,
    NewProfessor,
    NewReview,
    NewStudent,
    // Professor
    Professor,
    ProfessorId,
    ProfessorPatch,
    // Review
    Review,
    ReviewCategory,
    ReviewId,
    ReviewPatch,
    ScheduleSlot,
    Student,
    StudentPatch,
    // Subject
    Subject,
    SubjectCode,
    SubjectPatch,
    Weekday,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Store
// ============================================================================

pub use db::{default_database_path, Store, Tables};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    ClassRepository,
    Clock,
    ProfessorRepository,
    ReviewRepository,
    StudentRepository,
    SubjectRepository,
    SystemClock,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::CredentialingService;

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{ErrorResponse, ReturnCode};
pub use config::Config;
