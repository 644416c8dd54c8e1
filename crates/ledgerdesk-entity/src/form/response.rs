//! Form responses and answers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One client's submission to a form.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FormResponse {
    /// Unique response identifier.
    pub id: Uuid,
    /// The answered form.
    pub form_id: Uuid,
    /// The respondent.
    pub user_id: Uuid,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
}

/// A response joined with respondent details (admin view).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResponseWithUser {
    /// The response row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub response: FormResponse,
    /// Respondent name.
    pub user_name: String,
    /// Respondent email.
    pub user_email: String,
}

/// The answer to one field.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FormAnswer {
    /// Unique answer identifier.
    pub id: Uuid,
    /// Owning response.
    pub response_id: Uuid,
    /// Answered field.
    pub field_id: Uuid,
    /// Normalized value.
    pub value: serde_json::Value,
}

/// A response with its answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseDetail {
    /// The response.
    #[serde(flatten)]
    pub response: FormResponse,
    /// Answers in no particular order.
    pub answers: Vec<FormAnswer>,
}
