//! # ledgerdesk-api
//!
//! HTTP API layer for LedgerDesk built on Axum.
//!
//! Provides all REST endpoints, middleware (CORS, request logging,
//! timeouts), the `AuthUser` extractor, request DTOs with validation,
//! and the mapping from `AppError` to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
