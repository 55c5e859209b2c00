//! Critical Class (Turma) Invariants:
//!
//! 1. A class belongs to exactly one existing Subject
//! 2. A class is taught by at least one existing Professor
//! 3. Period is YYYYX with X in {1, 2}
//! 4. Schedule is non-empty; each slot satisfies 0 <= start < end <= 24
//! 5. Slots are checked independently (overlaps are allowed)
//! 6. No two classes share (subject_code, period, professor set)

pub mod entity;
pub mod invariants;

pub use entity::{Class, ClassPatch, NewClass};
pub use invariants::validate_class_shape;
