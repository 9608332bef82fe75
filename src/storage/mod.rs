//! Object storage for product images.

mod memory;
mod s3;

pub use memory::MemoryObjectStore;
pub use s3::S3Store;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("object upload failed: {0}")]
    Backend(String),
}

/// An image received from a multipart form, not yet stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key` and returns the public URL of the object.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError>;
}

/// Builds `{prefix}{millis}_{file_name}` with the file name reduced to URL-safe characters.
pub fn object_key(prefix: &str, millis: i64, file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{prefix}{millis}_{safe}")
}
