use crate::config::DisplayMode;
use crate::fetch::payload::AnalyticsPayload;
use crate::fetch::range::RangeToken;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Deterministic cache key for a `(domain, range, mode)` tuple.
pub fn cache_key(domain: &str, range: RangeToken, mode: DisplayMode) -> String {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(b"|");
    hasher.update(range.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(mode.as_str().as_bytes());
    hex::encode(hasher.finalize())
}

/// Thread-safe payload cache with TTL-based expiration.
///
/// Entries are opaque values, never mutated after insertion; concurrent
/// writers for the same key are last-write-wins.
#[derive(Clone)]
pub struct AnalyticsCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

struct CacheEntry {
    payload: AnalyticsPayload,
    stored_at: Instant,
}

impl AnalyticsCache {
    /// Create a new cache with the given TTL in seconds.
    /// A TTL of 0 disables caching (all lookups miss).
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Look up a cached payload by key. Returns `None` if missing or expired.
    pub fn get(&self, key: &str) -> Option<AnalyticsPayload> {
        if self.ttl.is_zero() {
            return None;
        }
        self.entries.lock().get(key).and_then(|entry| {
            if entry.stored_at.elapsed() > self.ttl {
                None
            } else {
                Some(entry.payload.clone())
            }
        })
    }

    /// Insert a payload, replacing any prior entry for the key.
    pub fn insert(&self, key: String, payload: AnalyticsPayload) {
        if self.ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.lock();
        entries.insert(
            key,
            CacheEntry {
                payload,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop the entry for a key, if any. Used by forced refresh.
    pub fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }

    /// Returns the number of entries currently in the cache.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(views: f64) -> AnalyticsPayload {
        AnalyticsPayload::from_value(&json!({ "summary": { "page_views": views } })).unwrap()
    }

    #[test]
    fn test_cache_insert_and_get() {
        let cache = AnalyticsCache::new(60);
        cache.insert("key1".to_string(), payload(10.0));
        assert_eq!(cache.get("key1").unwrap().summary.page_views, Some(10.0));
    }

    #[test]
    fn test_cache_miss() {
        let cache = AnalyticsCache::new(60);
        assert!(cache.get("nonexistent").is_none());
    }

    #[test]
    fn test_cache_disabled_with_zero_ttl() {
        let cache = AnalyticsCache::new(0);
        cache.insert("key1".to_string(), payload(10.0));
        assert!(cache.get("key1").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_cache_overwrite_is_last_write_wins() {
        let cache = AnalyticsCache::new(60);
        cache.insert("key".to_string(), payload(1.0));
        cache.insert("key".to_string(), payload(2.0));
        assert_eq!(cache.get("key").unwrap().summary.page_views, Some(2.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_remove() {
        let cache = AnalyticsCache::new(60);
        cache.insert("key".to_string(), payload(1.0));
        cache.remove("key");
        assert!(cache.get("key").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_shared_across_clones() {
        let cache = AnalyticsCache::new(60);
        let cache2 = cache.clone();
        cache.insert("shared".to_string(), payload(5.0));
        assert_eq!(cache2.get("shared").unwrap().summary.page_views, Some(5.0));
    }

    #[test]
    fn test_cache_key_deterministic() {
        let a = cache_key("example.com", RangeToken::SevenDays, DisplayMode::Chart);
        let b = cache_key("example.com", RangeToken::SevenDays, DisplayMode::Chart);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cache_key_distinct_per_tuple() {
        let base = cache_key("example.com", RangeToken::SevenDays, DisplayMode::Chart);
        assert_ne!(
            base,
            cache_key("example.org", RangeToken::SevenDays, DisplayMode::Chart)
        );
        assert_ne!(
            base,
            cache_key("example.com", RangeToken::ThirtyDays, DisplayMode::Chart)
        );
        assert_ne!(
            base,
            cache_key("example.com", RangeToken::SevenDays, DisplayMode::Sparkline)
        );
    }
}
