//! File exchange services for clients and admins.

pub mod admin;
pub mod service;

pub use admin::{AdminFileQuery, AdminRegisterFileRequest, AdminUpdateFileRequest};
pub use service::{
    FileService, RegisterFileRequest, TransferLimits, UploadTicket, UploadUrlRequest,
};
