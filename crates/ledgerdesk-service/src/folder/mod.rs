//! Virtual folder management over file rows.

pub mod service;

pub use service::FolderService;
