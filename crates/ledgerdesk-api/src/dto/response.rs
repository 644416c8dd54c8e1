//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Number of rows a bulk operation touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Affected rows.
    pub count: u64,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Readiness response with per-dependency status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// `"ok"` or `"unavailable"`.
    pub status: String,
    /// `"up"` or `"down"`.
    pub database: String,
    /// `"up"` or `"down"`.
    pub storage: String,
}
