//! Core type definitions used across the LedgerDesk workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
