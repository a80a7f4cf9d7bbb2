use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Customer feedback shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: i32,
    pub name: String,
    pub message: String,
    /// Star rating between 1 and 5.
    pub rating: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a testimonial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestimonial {
    pub name: String,
    pub message: String,
    pub rating: i32,
}

impl NewTestimonial {
    pub fn new(name: impl Into<String>, message: impl Into<String>, rating: i32) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            rating,
        }
    }
}
