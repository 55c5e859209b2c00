use chrono::{DateTime, NaiveDateTime};

use super::category::ReviewCategory;
use super::entity::Review;
use crate::domain::shared::{
    validate_bounded_text, validate_positive_key, MAX_COMMENT_LENGTH, MAX_TITLE_LENGTH,
};
use crate::domain::{ClassCode, DomainError, DomainResult};

const MAX_STARS: i64 = 5;

/// Validates the invariants of a Review that need no other entity.
/// Author and class target resolution happen in the review repository.
pub fn validate_review_shape(review: &Review) -> DomainResult<()> {
    validate_positive_key("student_enrollment", review.student_enrollment)?;
    validate_bounded_text("title", &review.title, MAX_TITLE_LENGTH)?;
    validate_bounded_text("comment", &review.comment, MAX_COMMENT_LENGTH)?;
    validate_date_time(&review.date_time)?;
    validate_stars(review.stars)?;
    validate_review_category(review.category, review.class_target_code)?;
    if let Some(code) = review.class_target_code {
        validate_positive_key("class_target_code", code)?;
    }
    Ok(())
}

/// Class-targeted categories must name a class; general ones may omit it
pub fn validate_review_category(
    category: ReviewCategory,
    class_target_code: Option<ClassCode>,
) -> DomainResult<()> {
    if category.requires_class() && class_target_code.is_none() {
        return Err(DomainError::InvalidInput(format!(
            "category {} requires a target class",
            category
        )));
    }
    Ok(())
}

fn validate_stars(stars: Option<i64>) -> DomainResult<()> {
    match stars {
        Some(s) if !(0..=MAX_STARS).contains(&s) => Err(DomainError::InvalidInput(format!(
            "stars must be between 0 and {}, got {}",
            MAX_STARS, s
        ))),
        _ => Ok(()),
    }
}

/// Accepts RFC 3339 and offset-less ISO-8601 timestamps
fn validate_date_time(value: &str) -> DomainResult<()> {
    let value = value.trim();
    let parses = DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok();
    if !parses {
        return Err(DomainError::InvalidInput(format!(
            "date_time '{}' is not an ISO-8601 timestamp",
            value
        )));
    }
    Ok(())
}
