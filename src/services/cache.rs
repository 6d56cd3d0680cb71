// src/services/cache.rs
// DOCUMENTATION: In-memory cache for Google Places API responses
// PURPOSE: Reduce API calls by caching search and details lookups

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Cache entry with expiration
#[derive(Clone, Debug)]
struct CacheEntry {
    data: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(data: String, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Thread-safe TTL cache holding raw JSON responses keyed by lookup kind.
pub struct PlacesCache {
    store: Arc<RwLock<HashMap<String, CacheEntry>>>,
    default_ttl: Duration,
}

impl PlacesCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            default_ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Cache key for a text search. Queries differing only in case or
    /// surrounding whitespace hit the same entry.
    pub fn search_key(query: &str) -> String {
        format!("search:{}", query.trim().to_lowercase())
    }

    /// Cache key for a place-details lookup. Place ids are opaque and
    /// case-sensitive, so they are used as-is.
    pub fn details_key(place_id: &str) -> String {
        format!("details:{}", place_id)
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().await;

        if let Some(entry) = store.get(key) {
            if !entry.is_expired() {
                log::debug!("Cache HIT for key: {}", key);
                return Some(entry.data.clone());
            }
            log::debug!("Cache EXPIRED for key: {}", key);
        } else {
            log::debug!("Cache MISS for key: {}", key);
        }

        None
    }

    pub async fn set(&self, key: String, value: String) {
        let mut store = self.store.write().await;
        store.insert(key.clone(), CacheEntry::new(value, self.default_ttl));
        log::debug!(
            "Cache SET for key: {} (TTL: {}s)",
            key,
            self.default_ttl.as_secs()
        );
    }

    /// Drop expired entries. Called periodically by the cleanup task.
    pub async fn cleanup(&self) {
        let mut store = self.store.write().await;
        let before_count = store.len();
        store.retain(|_, entry| !entry.is_expired());
        let after_count = store.len();

        if before_count > after_count {
            log::info!(
                "Cache cleanup: removed {} expired entries ({} remaining)",
                before_count - after_count,
                after_count
            );
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

/// Start background cleanup task
/// DOCUMENTATION: Periodically removes expired entries
pub fn start_cleanup_task(cache: Arc<PlacesCache>, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));

        loop {
            interval.tick().await;
            cache.cleanup().await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_returns_the_value() {
        let cache = PlacesCache::new(60);
        cache
            .set("search:borobudur".to_string(), "{\"status\":\"OK\"}".to_string())
            .await;

        let result = cache.get("search:borobudur").await;
        assert_eq!(result, Some("{\"status\":\"OK\"}".to_string()));
    }

    #[tokio::test]
    async fn expired_entries_are_not_returned() {
        let cache = PlacesCache::new(0);
        cache.set("k".to_string(), "v".to_string()).await;

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn cleanup_drops_expired_entries() {
        let cache = PlacesCache::new(0);
        cache.set("k1".to_string(), "v1".to_string()).await;
        cache.set("k2".to_string(), "v2".to_string()).await;

        tokio::time::sleep(Duration::from_millis(10)).await;
        cache.cleanup().await;

        assert_eq!(cache.len().await, 0);
    }

    #[test]
    fn search_keys_normalize_case_and_whitespace() {
        assert_eq!(
            PlacesCache::search_key("  Borobudur Temple "),
            PlacesCache::search_key("borobudur temple")
        );
        assert_ne!(
            PlacesCache::search_key("borobudur"),
            PlacesCache::search_key("prambanan")
        );
    }

    #[test]
    fn details_keys_keep_place_ids_intact() {
        assert_eq!(
            PlacesCache::details_key("ChIJl9HQn1ZXei4R"),
            "details:ChIJl9HQn1ZXei4R"
        );
    }
}
