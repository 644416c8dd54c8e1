//! Blog post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An article on the public blog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlogPost {
    /// Unique identifier.
    pub id: Uuid,
    /// URL slug (unique).
    pub slug: String,
    /// Headline.
    pub title: String,
    /// Teaser shown in listings.
    pub excerpt: Option<String>,
    /// Article body (Markdown).
    pub content: String,
    /// Cover image URL.
    pub cover_image_url: Option<String>,
    /// Author (admin).
    pub author_id: Option<Uuid>,
    /// Visible on the public site.
    pub is_published: bool,
    /// First publication time. Never reset once set.
    pub published_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlogPost {
    /// Unique slug.
    pub slug: String,
    /// Headline.
    pub title: String,
    /// Teaser.
    pub excerpt: Option<String>,
    /// Body.
    pub content: String,
    /// Cover image.
    pub cover_image_url: Option<String>,
    /// Author.
    pub author_id: Option<Uuid>,
    /// Published flag.
    pub is_published: bool,
}

/// Post edits. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlogPost {
    /// New unique slug.
    pub slug: Option<String>,
    /// Headline.
    pub title: Option<String>,
    /// Teaser.
    pub excerpt: Option<String>,
    /// Body.
    pub content: Option<String>,
    /// Cover image.
    pub cover_image_url: Option<String>,
    /// Published flag.
    pub is_published: Option<bool>,
}
