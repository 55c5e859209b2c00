pub mod entity;
pub mod invariants;

pub use entity::{NewProfessor, Professor, ProfessorPatch};
pub use invariants::validate_professor;
