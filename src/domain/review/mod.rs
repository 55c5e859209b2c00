pub mod category;
pub mod entity;
pub mod invariants;

pub use category::{CategoryScope, ReviewCategory};
pub use entity::{NewReview, Review, ReviewPatch};
pub use invariants::{validate_review_category, validate_review_shape};
