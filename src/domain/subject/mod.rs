pub mod entity;
pub mod invariants;

pub use entity::{Subject, SubjectPatch};
pub use invariants::validate_subject;
