use super::entity::Professor;
use crate::domain::shared::{validate_bounded_text, MAX_LENGTH_NAME};
use crate::domain::DomainResult;

/// Validates all Professor invariants.
/// The department is a closed enumeration, so only the name needs checking.
pub fn validate_professor(professor: &Professor) -> DomainResult<()> {
    validate_bounded_text("professor name", &professor.name, MAX_LENGTH_NAME)
}
