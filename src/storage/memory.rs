#[cfg(test)]
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use super::{ObjectStore, UploadError};

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
}

/// Accepts uploads without keeping the bytes and hands out `memory://` locations.
#[derive(Default)]
pub struct MemoryObjectStore {
    #[cfg(test)]
    objects: Mutex<Vec<StoredObject>>,
    fail: bool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    #[cfg(test)]
    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().map(|o| o.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        if self.fail {
            return Err(UploadError::Backend("memory store configured to fail".into()));
        }
        #[cfg(test)]
        self.objects
            .lock()
            .map_err(|_| UploadError::Backend("object list poisoned".into()))?
            .push(StoredObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        debug!(bucket, key, content_type, size = bytes.len(), "Accepted object in memory");
        Ok(format!("memory://{bucket}/{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_returns_memory_location_and_records_object() {
        let images = MemoryObjectStore::new();
        let url = images.upload("b", "k/1.png", Some("image/png"), vec![1, 2]).await.unwrap();

        assert_eq!(url, "memory://b/k/1.png");
        let objects = images.objects();
        assert_eq!(objects.len(), 1);
        assert_eq!((objects[0].bucket.as_str(), objects[0].key.as_str()), ("b", "k/1.png"));
    }

    #[tokio::test]
    async fn failing_store_keeps_nothing() {
        let images = MemoryObjectStore::failing();
        assert!(images.upload("b", "k", None, vec![]).await.is_err());
        assert!(images.objects().is_empty());
    }
}
