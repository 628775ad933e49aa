//! Thumbnail resolution pipeline.

use std::time::Duration;

use tracing::{debug, warn};

use tvpg_models::{ParsedVideo, Provider};

use crate::cache::ThumbnailCache;
use crate::vimeo;

/// Resolves thumbnails for parsed videos.
///
/// User overrides always win. YouTube uses its deterministic image URL with
/// no network traffic. Vimeo goes through the oEmbed endpoint behind the
/// TTL cache. Everything else yields no thumbnail.
pub struct ThumbnailResolver {
    client: reqwest::Client,
    cache: ThumbnailCache,
    endpoint: String,
}

impl ThumbnailResolver {
    pub fn new() -> Self {
        Self::with_endpoint(vimeo::DEFAULT_ENDPOINT)
    }

    /// Point the resolver at a custom oEmbed endpoint (used in tests).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            cache: ThumbnailCache::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Override the cache TTL (used in tests).
    pub fn with_cache_ttl(endpoint: impl Into<String>, ttl: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            cache: ThumbnailCache::with_ttl(ttl),
            endpoint: endpoint.into(),
        }
    }

    /// Resolve the thumbnail for a parsed video.
    ///
    /// Never fails: remote lookup errors degrade to `None` and are logged,
    /// not propagated, so a missing thumbnail cannot break a render.
    pub async fn resolve(
        &self,
        parsed: &ParsedVideo,
        user_override: Option<&str>,
    ) -> Option<String> {
        if let Some(custom) = user_override.filter(|s| !s.trim().is_empty()) {
            return Some(custom.to_string());
        }

        match parsed.provider {
            Provider::Youtube => {
                let id = parsed.id.as_deref()?;
                Some(format!(
                    "https://img.youtube.com/vi/{}/maxresdefault.jpg",
                    id
                ))
            }
            Provider::Vimeo => {
                let id = parsed.id.as_deref()?;
                self.resolve_vimeo(id).await
            }
            _ => None,
        }
    }

    async fn resolve_vimeo(&self, id: &str) -> Option<String> {
        if let Some(cached) = self.cache.get(id).await {
            debug!(video_id = %id, "Vimeo thumbnail cache hit");
            return Some(cached);
        }

        match vimeo::fetch_thumbnail(&self.client, &self.endpoint, id).await {
            Ok(url) => {
                self.cache.insert(id, &url).await;
                Some(url)
            }
            Err(e) => {
                warn!(video_id = %id, error = %e, "Vimeo thumbnail lookup failed");
                None
            }
        }
    }

    /// Drop a cached entry (admin purge hook).
    pub async fn purge_cached(&self, id: &str) {
        self.cache.purge(id).await;
    }
}

impl Default for ThumbnailResolver {
    fn default() -> Self {
        Self::new()
    }
}
