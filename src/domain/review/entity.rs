use serde::{Deserialize, Serialize};

use super::category::ReviewCategory;
use crate::domain::{ClassCode, Enrollment, ReviewId};

/// A rated, commented entry authored by a student.
/// Optionally targets a class and, through it, the professors teaching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Sequential identifier assigned by the store
    pub id_aval: ReviewId,

    /// Author
    pub student_enrollment: Enrollment,

    /// ISO-8601 creation timestamp
    pub date_time: String,

    pub title: String,

    pub comment: String,

    pub category: ReviewCategory,

    pub is_anonymous: bool,

    /// 0 to 5, absent when the author did not rate
    #[serde(default)]
    pub stars: Option<i64>,

    #[serde(default)]
    pub class_target_code: Option<ClassCode>,

    /// Free text
    #[serde(default)]
    pub mentions: String,
}

/// Review as submitted by its author; id and timestamp are assigned on creation
#[derive(Debug, Clone)]
pub struct NewReview {
    pub student_enrollment: Enrollment,
    pub title: String,
    pub comment: String,
    pub category: ReviewCategory,
    pub is_anonymous: bool,
    pub stars: Option<i64>,
    pub class_target_code: Option<ClassCode>,
    pub mentions: String,
}

/// Partial update for a Review.
/// Author and class target drive the backreferences and stay fixed.
#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub title: Option<String>,
    pub comment: Option<String>,
    pub date_time: Option<String>,
    pub category: Option<ReviewCategory>,
    pub is_anonymous: Option<bool>,
    pub stars: Option<Option<i64>>,
    pub mentions: Option<String>,
}

impl Review {
    pub fn new(id_aval: ReviewId, data: NewReview, date_time: String) -> Self {
        Self {
            id_aval,
            student_enrollment: data.student_enrollment,
            date_time,
            title: data.title,
            comment: data.comment,
            category: data.category,
            is_anonymous: data.is_anonymous,
            stars: data.stars,
            class_target_code: data.class_target_code,
            mentions: data.mentions,
        }
    }

    pub fn apply(&mut self, patch: ReviewPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(comment) = patch.comment {
            self.comment = comment;
        }
        if let Some(date_time) = patch.date_time {
            self.date_time = date_time;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(anonymous) = patch.is_anonymous {
            self.is_anonymous = anonymous;
        }
        if let Some(stars) = patch.stars {
            self.stars = stars;
        }
        if let Some(mentions) = patch.mentions {
            self.mentions = mentions;
        }
    }
}
