use super::entity::Student;
use crate::domain::shared::{
    validate_bounded_text, validate_positive_key, MAX_LENGTH_NAME, MAX_PASSWORD_LENGTH,
    MAX_USERNAME_LENGTH,
};
use crate::domain::DomainResult;

/// Validates all Student invariants
pub fn validate_student(student: &Student) -> DomainResult<()> {
    validate_positive_key("enrollment", student.enrollment)?;
    validate_bounded_text("username", &student.username, MAX_USERNAME_LENGTH)?;
    validate_bounded_text("student name", &student.name, MAX_LENGTH_NAME)?;
    validate_bounded_text("password", &student.password, MAX_PASSWORD_LENGTH)?;
    validate_bounded_text(
        "institutional email",
        &student.institutional_email,
        MAX_USERNAME_LENGTH,
    )?;
    Ok(())
}

/// Critical Student Invariants:
///
/// 1. Enrollment is positive and immutable
/// 2. Username is unique (checked by the student repository, needs the whole store)
/// 3. Subject and review lists never hold duplicates
/// 4. Deleting a student deletes every authored review and leaves no roster entry
