use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::ObjectStore;
use crate::store::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub images: Arc<dyn ObjectStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        images: Arc<dyn ObjectStore>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            images,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
