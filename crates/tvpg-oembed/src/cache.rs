//! In-memory thumbnail cache with per-entry expiry.
//!
//! Keyed by provider-specific video id. Racing fetches for the same id are
//! last-write-wins; a duplicate fetch is wasteful but not incorrect.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Default time-to-live for cached thumbnail URLs.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Entry {
    value: String,
    expires_at: Instant,
}

/// TTL cache for resolved thumbnail URLs.
pub struct ThumbnailCache {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Look up a non-expired entry.
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if Instant::now() < entry.expires_at {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Insert or overwrite an entry with a fresh TTL.
    pub async fn insert(&self, key: &str, value: &str) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop a single entry.
    pub async fn purge(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    /// Drop every expired entry.
    pub async fn purge_expired(&self) {
        let now = Instant::now();
        self.entries
            .write()
            .await
            .retain(|_, entry| now < entry.expires_at);
    }

    /// Number of live (possibly expired) entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new()
    }
}
