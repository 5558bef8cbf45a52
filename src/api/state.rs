use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::DatasetProvider;

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<dyn DatasetProvider>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(dataset: Arc<dyn DatasetProvider>, config: AppConfig) -> Self {
        Self {
            dataset,
            config: Arc::new(config),
        }
    }
}
