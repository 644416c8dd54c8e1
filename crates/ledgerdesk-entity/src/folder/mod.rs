//! Virtual folders derived from file rows.

pub mod path;
pub mod tree;

pub use tree::{FolderCount, FolderListing, FolderNode, FolderSummary, FolderTree};
