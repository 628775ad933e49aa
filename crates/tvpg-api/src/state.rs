//! Application state.

use std::sync::Arc;

use tvpg_oembed::ThumbnailResolver;
use tvpg_store::{ProductVideoStore, SettingsStore};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub settings: Arc<SettingsStore>,
    pub products: Arc<ProductVideoStore>,
    pub thumbnails: Arc<ThumbnailResolver>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            settings: Arc::new(SettingsStore::new()),
            products: Arc::new(ProductVideoStore::new()),
            thumbnails: Arc::new(ThumbnailResolver::new()),
        }
    }
}
