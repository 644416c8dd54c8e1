//! S3-compatible object store using signed URLs.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use chrono::Utc;
use tracing::{debug, info};

use ledgerdesk_core::config::S3StorageConfig;
use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_core::traits::{ObjectStore, PresignedUrl};

use crate::keys::attachment_disposition;

/// S3 (or MinIO, R2, ...) backed object store.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a client from configuration.
    ///
    /// Static credentials are used when both keys are set; otherwise the
    /// default AWS provider chain applies.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("storage.s3.bucket is required"));
        }

        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 object store"
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if !config.access_key.is_empty() && !config.secret_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "ledgerdesk-config",
            ));
        }
        let shared = loader.load().await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).force_path_style(config.force_path_style);
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(config.endpoint.clone());
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }

    fn presigning(ttl_seconds: u64) -> AppResult<PresigningConfig> {
        PresigningConfig::expires_in(Duration::from_secs(ttl_seconds)).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid signed URL lifetime", e)
        })
    }

    fn signed(url: String, method: &str, ttl_seconds: u64) -> PresignedUrl {
        PresignedUrl {
            url,
            method: method.to_string(),
            expires_at: Utc::now() + chrono::Duration::seconds(ttl_seconds as i64),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| true)
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "S3 health check failed", e))
    }

    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        content_length: u64,
        ttl_seconds: u64,
    ) -> AppResult<PresignedUrl> {
        let content_length = i64::try_from(content_length)
            .map_err(|_| AppError::validation("Upload size is out of range"))?;
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .content_length(content_length)
            .presigned(Self::presigning(ttl_seconds)?)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to sign upload", e))?;

        debug!(key, content_length, "Signed upload URL");
        Ok(Self::signed(request.uri().to_string(), "PUT", ttl_seconds))
    }

    async fn presign_download(
        &self,
        key: &str,
        filename: &str,
        ttl_seconds: u64,
    ) -> AppResult<PresignedUrl> {
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .response_content_disposition(attachment_disposition(filename))
            .presigned(Self::presigning(ttl_seconds)?)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to sign download", e))?;

        debug!(key, "Signed download URL");
        Ok(Self::signed(request.uri().to_string(), "GET", ttl_seconds))
    }

    async fn object_size(&self, key: &str) -> AppResult<Option<u64>> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(head) => Ok(Some(
                head.content_length().map_or(0, |len| len.max(0) as u64),
            )),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                "Failed to check object",
                e,
            )),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to delete object", e))?;
        debug!(key, "Deleted object");
        Ok(())
    }
}
