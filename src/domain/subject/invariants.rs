use super::entity::Subject;
use crate::domain::shared::{
    validate_bounded_text, validate_positive_key, MAX_DESCRIPTION_LENGTH, MAX_LENGTH_NAME,
};
use crate::domain::{DomainError, DomainResult};

/// Validates all Subject invariants
pub fn validate_subject(subject: &Subject) -> DomainResult<()> {
    validate_positive_key("subject code", subject.code)?;
    validate_credits(subject.credits)?;
    validate_bounded_text("subject name", &subject.name, MAX_LENGTH_NAME)?;
    validate_description(&subject.description)?;
    Ok(())
}

fn validate_credits(credits: i64) -> DomainResult<()> {
    if credits < 0 {
        return Err(DomainError::InvalidInput(format!(
            "credits cannot be negative, got {}",
            credits
        )));
    }
    Ok(())
}

/// Description is optional but bounded
fn validate_description(description: &str) -> DomainResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(DomainError::InvalidInput(format!(
            "description exceeds {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

/// Invariants that must hold true for Subject domain:
///
/// 1. Code is positive and immutable
/// 2. Credits are never negative
/// 3. Name is non-empty and bounded
/// 4. Deleting a subject removes its classes and every subject-history entry
