//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Which object store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderKind {
    /// S3-compatible object storage (AWS, MinIO, R2...).
    #[default]
    S3,
    /// Process-local store, for development and tests.
    Memory,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend provider.
    #[serde(default)]
    pub provider: StorageProviderKind,
    /// Maximum upload size in bytes (default 100 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Lifetime of signed upload URLs.
    #[serde(default = "default_upload_ttl")]
    pub upload_url_ttl_seconds: u64,
    /// Lifetime of signed download URLs.
    #[serde(default = "default_download_ttl")]
    pub download_url_ttl_seconds: u64,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProviderKind::default(),
            max_upload_size_bytes: default_max_upload(),
            upload_url_ttl_seconds: default_upload_ttl(),
            download_url_ttl_seconds: default_download_ttl(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO). Empty = AWS.
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID. Empty = default AWS credential chain.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Use path-style addressing (required by most S3 clones).
    #[serde(default)]
    pub force_path_style: bool,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            bucket: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            force_path_style: false,
        }
    }
}

fn default_max_upload() -> u64 {
    104_857_600 // 100 MiB
}

fn default_upload_ttl() -> u64 {
    900
}

fn default_download_ttl() -> u64 {
    300
}

fn default_region() -> String {
    "us-east-1".to_string()
}
