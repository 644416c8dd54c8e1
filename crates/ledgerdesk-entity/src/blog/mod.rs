//! Blog entities.

pub mod model;
pub mod slug;

pub use model::{BlogPost, CreateBlogPost, UpdateBlogPost};
