use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;

use super::{ObjectStore, UploadError};

const FALLBACK_REGION: &str = "us-east-1";

pub struct S3Store {
    client: Client,
    region: String,
}

impl S3Store {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        let region = sdk_config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| FALLBACK_REGION.to_string());
        Self {
            client: Client::new(sdk_config),
            region,
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .set_content_type(content_type.map(str::to_string))
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| UploadError::Backend(DisplayErrorContext(e).to_string()))?;

        debug!(bucket, key, size, "Uploaded object");
        Ok(format!("https://{bucket}.s3.{}.amazonaws.com/{key}", self.region))
    }
}
