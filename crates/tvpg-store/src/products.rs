//! Product and variation video metadata.
//!
//! Each product can carry a gallery video and an optional thumbnail
//! override; variable products additionally carry per-variation videos
//! unless the product opts into sharing one video across all variations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Product-level video metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVideo {
    pub video_url: Option<String>,
    #[serde(alias = "video_thumb_url")]
    pub thumb_url: Option<String>,
    /// When set, variations always show the product video, never their own.
    #[serde(default, alias = "use_same_video_for_all_variations")]
    pub use_same_video: bool,
}

/// Variation-level video metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationVideo {
    pub video_url: Option<String>,
    #[serde(alias = "video_thumb_url")]
    pub thumb_url: Option<String>,
}

#[derive(Debug, Default)]
struct ProductEntry {
    video: ProductVideo,
    variations: HashMap<u64, VariationVideo>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[derive(Debug, Default)]
pub struct ProductVideoStore {
    products: RwLock<HashMap<u64, ProductEntry>>,
}

impl ProductVideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace the product-level video metadata. Blank URLs are
    /// stored as absent.
    pub async fn upsert_product(&self, product_id: u64, mut video: ProductVideo) {
        video.video_url = normalize(video.video_url);
        video.thumb_url = normalize(video.thumb_url);
        let mut products = self.products.write().await;
        products.entry(product_id).or_default().video = video;
        debug!(product_id, "Stored product video metadata");
    }

    /// Set one variation's video metadata.
    pub async fn set_variation(
        &self,
        product_id: u64,
        variation_id: u64,
        mut video: VariationVideo,
    ) -> StoreResult<()> {
        video.video_url = normalize(video.video_url);
        video.thumb_url = normalize(video.thumb_url);
        let mut products = self.products.write().await;
        let entry = products
            .get_mut(&product_id)
            .ok_or(StoreError::ProductNotFound(product_id))?;
        entry.variations.insert(variation_id, video);
        Ok(())
    }

    pub async fn get_product(&self, product_id: u64) -> StoreResult<ProductVideo> {
        let products = self.products.read().await;
        products
            .get(&product_id)
            .map(|e| e.video.clone())
            .ok_or(StoreError::ProductNotFound(product_id))
    }

    /// The video a given variation should actually show.
    ///
    /// With `use_same_video` set, the product video wins unconditionally.
    /// Otherwise the variation's own video is used when present, and the
    /// thumbnail falls back to the product thumbnail when the variation has
    /// a video but no thumbnail of its own.
    pub async fn effective_video(
        &self,
        product_id: u64,
        variation_id: Option<u64>,
    ) -> StoreResult<VariationVideo> {
        let products = self.products.read().await;
        let entry = products
            .get(&product_id)
            .ok_or(StoreError::ProductNotFound(product_id))?;

        let product_level = VariationVideo {
            video_url: entry.video.video_url.clone(),
            thumb_url: entry.video.thumb_url.clone(),
        };

        let Some(variation_id) = variation_id else {
            return Ok(product_level);
        };

        if entry.video.use_same_video {
            return Ok(product_level);
        }

        let variation = entry
            .variations
            .get(&variation_id)
            .ok_or(StoreError::VariationNotFound {
                product_id,
                variation_id,
            })?;

        match &variation.video_url {
            Some(url) => Ok(VariationVideo {
                video_url: Some(url.clone()),
                thumb_url: variation
                    .thumb_url
                    .clone()
                    .or_else(|| entry.video.thumb_url.clone()),
            }),
            None => Ok(product_level),
        }
    }
}
