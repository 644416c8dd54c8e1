//! Curated resource link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An external resource listed on the site (IRS forms, state portals, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Link {
    /// Unique identifier.
    pub id: Uuid,
    /// Link text.
    pub title: String,
    /// Target URL.
    pub url: String,
    /// Short description.
    pub description: Option<String>,
    /// Sort key (ascending).
    pub display_order: i32,
    /// Shown on the public site.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLink {
    /// Link text.
    pub title: String,
    /// Target URL.
    pub url: String,
    /// Description.
    pub description: Option<String>,
    /// Sort key.
    #[serde(default)]
    pub display_order: i32,
    /// Active flag.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Link edits. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLink {
    /// Link text.
    pub title: Option<String>,
    /// Target URL.
    pub url: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Sort key.
    pub display_order: Option<i32>,
    /// Active flag.
    pub is_active: Option<bool>,
}
