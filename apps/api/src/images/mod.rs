//! Profile image storage in an S3-compatible bucket.

pub mod handlers;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::{config::Credentials, primitives::ByteStream, Client as S3Client};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;

/// Folder every profile image is stored under.
pub const PROFILE_IMAGE_FOLDER: &str = "profile_images";

/// Stores an object and returns the URL it can be fetched from.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload_image(&self, key: &str, body: Bytes, content_type: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct S3ImageStore {
    client: S3Client,
    bucket: String,
    endpoint: Option<String>,
}

impl S3ImageStore {
    /// Builds a client for AWS, or for any S3-compatible service when
    /// `IMAGE_ENDPOINT` is set (path-style addressing in that case).
    pub async fn from_config(config: &Config) -> Self {
        let credentials = Credentials::new(
            &config.image_access_key_id,
            &config.image_secret_access_key,
            None,
            None,
            "jobmatch-static",
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.image_region.clone()))
            .credentials_provider(credentials);
        if let Some(endpoint) = &config.image_endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.image_endpoint.is_some())
            .build();

        Self {
            client: S3Client::from_conf(s3_config),
            bucket: config.image_bucket.clone(),
            endpoint: config.image_endpoint.clone(),
        }
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn upload_image(&self, key: &str, body: Bytes, content_type: &str) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .context("s3 put_object")?;

        let url = public_url(self.endpoint.as_deref(), &self.bucket, key);
        info!(key, "profile image stored");
        Ok(url)
    }
}

pub fn public_url(endpoint: Option<&str>, bucket: &str, key: &str) -> String {
    match endpoint {
        Some(endpoint) => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
        None => format!("https://{bucket}.s3.amazonaws.com/{key}"),
    }
}

/// `profile_images/<uuid>-<name>`, with anything outside `[A-Za-z0-9._-]`
/// in the client-supplied name replaced by `_`.
pub fn profile_image_key(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    };
    format!("{PROFILE_IMAGE_FOLDER}/{}-{cleaned}", Uuid::new_v4())
}
