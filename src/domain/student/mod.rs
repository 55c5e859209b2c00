pub mod entity;
pub mod invariants;

pub use entity::{NewStudent, Student, StudentPatch};
pub use invariants::validate_student;
