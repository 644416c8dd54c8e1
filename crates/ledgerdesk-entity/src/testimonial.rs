//! Testimonial entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lowest star rating.
pub const MIN_RATING: i32 = 1;
/// Highest star rating.
pub const MAX_RATING: i32 = 5;

/// A client quote shown on the marketing site.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Testimonial {
    /// Unique identifier.
    pub id: Uuid,
    /// Who said it.
    pub author_name: String,
    /// Their job title.
    pub author_title: Option<String>,
    /// Their company.
    pub company: Option<String>,
    /// The quote.
    pub content: String,
    /// 1 to 5 stars.
    pub rating: i32,
    /// Shown on the public site.
    pub is_published: bool,
    /// Sort key (ascending).
    pub display_order: i32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a testimonial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTestimonial {
    /// Author.
    pub author_name: String,
    /// Title.
    pub author_title: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Quote.
    pub content: String,
    /// Stars.
    pub rating: i32,
    /// Published flag.
    #[serde(default)]
    pub is_published: bool,
    /// Sort key.
    #[serde(default)]
    pub display_order: i32,
}

/// Testimonial edits. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTestimonial {
    /// Author.
    pub author_name: Option<String>,
    /// Title.
    pub author_title: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Quote.
    pub content: Option<String>,
    /// Stars.
    pub rating: Option<i32>,
    /// Published flag.
    pub is_published: Option<bool>,
    /// Sort key.
    pub display_order: Option<i32>,
}
