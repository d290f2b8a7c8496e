//! In-memory response cache with per-entry expiry.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use verselight_core::constants::{CACHE_NOTE, DEFAULT_CACHE_TTL, DEFAULT_SWEEP_INTERVAL};

/// Builds the cache key for a feature request.
///
/// Format: `feature:reference`, followed by `:name:value|name:value` when extra
/// parameters are present. Parameters are sorted by name first, so the key does
/// not depend on the order they were supplied in.
pub fn generate_key(feature: &str, reference: &str, params: &[(&str, &str)]) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_unstable();

    let params = sorted
        .iter()
        .map(|(name, value)| format!("{}:{}", name, value))
        .collect::<Vec<_>>()
        .join("|");

    if params.is_empty() {
        format!("{}:{}", feature, reference)
    } else {
        format!("{}:{}:{}", feature, reference, params)
    }
}

/// Lifetime of a cached entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ttl {
    /// Expires this long after insertion
    After(Duration),
    /// Stays until cleared or overwritten
    Never,
}

/// Cache entry with optional expiry.
#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Ttl) -> Self {
        let now = Utc::now();
        let expires_at = match ttl {
            // A TTL too large to represent never expires.
            Ttl::After(ttl) => chrono::Duration::from_std(ttl)
                .ok()
                .and_then(|ttl| now.checked_add_signed(ttl)),
            Ttl::Never => None,
        };
        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    /// The single staleness predicate shared by reads and the sweep.
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now > expires_at)
    }
}

/// Timestamps of a stored entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInfo {
    /// When the entry was (last) written
    pub created_at: DateTime<Utc>,
    /// When it stops being served; `None` means never
    pub expires_at: Option<DateTime<Utc>>,
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default TTL in seconds
    pub default_ttl_seconds: u64,
    /// Interval between background sweeps, in seconds
    pub sweep_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: DEFAULT_CACHE_TTL.as_secs(),
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL.as_secs(),
        }
    }
}

impl CacheConfig {
    /// Default TTL as a duration.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    /// Sweep interval as a duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently stored, expired-but-unswept ones included
    pub count: usize,
    /// Reminder that the store is volatile
    pub note: &'static str,
}

/// In-memory cache for shaped upstream responses.
///
/// Thread-safe. One instance is shared by all handlers of a process; values
/// default to JSON so every feature can share the same store.
pub struct ResponseCache<V = serde_json::Value> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    config: CacheConfig,
}

impl<V: Clone> ResponseCache<V> {
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Gets a cached value.
    ///
    /// Returns `None` if the key is absent or expired. An expired entry is
    /// removed on the way out.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Utc::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired_at(now) => {
                    debug!(key, "Cache hit");
                    return Some(entry.value.clone());
                }
                Some(_) => {}
            }
        }

        // Another writer may have refreshed the entry between the two locks.
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(key) {
            if entry.is_expired_at(now) {
                entries.remove(key);
                debug!(key, "Evicted stale entry on read");
            } else {
                return Some(entry.value.clone());
            }
        }
        None
    }

    /// Caches a value with the default TTL.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, Ttl::After(self.config.default_ttl()));
    }

    /// Caches a value with an explicit TTL, replacing any previous entry.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Ttl) {
        let key = key.into();
        debug!(key = %key, ?ttl, "Cache set");
        self.entries.write().insert(key, CacheEntry::new(value, ttl));
    }

    /// Returns the timestamps of a live entry.
    pub fn entry(&self, key: &str) -> Option<EntryInfo> {
        let now = Utc::now();
        self.entries
            .read()
            .get(key)
            .filter(|e| !e.is_expired_at(now))
            .map(|e| EntryInfo {
                created_at: e.created_at,
                expires_at: e.expires_at,
            })
    }

    /// Removes a cached entry.
    pub fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes all expired entries and returns how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired_at(now));
        before - entries.len()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            count: self.len(),
            note: CACHE_NOTE,
        }
    }

    #[cfg(test)]
    fn insert_expiring_at(&self, key: &str, value: V, expires_at: DateTime<Utc>) {
        self.entries.write().insert(
            key.to_string(),
            CacheEntry {
                value,
                created_at: Utc::now(),
                expires_at: Some(expires_at),
            },
        );
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn past() -> DateTime<Utc> {
        Utc::now() - chrono::Duration::seconds(5)
    }

    #[test]
    fn test_generate_key_without_params() {
        assert_eq!(generate_key("context", "John 3:16", &[]), "context:John 3:16");
    }

    #[test]
    fn test_generate_key_with_params() {
        assert_eq!(
            generate_key("translate", "John 3:16", &[("testament", "NT")]),
            "translate:John 3:16:testament:NT"
        );
    }

    #[test]
    fn test_generate_key_sorts_params() {
        let a = generate_key("t", "r", &[("a", "1"), ("b", "2")]);
        let b = generate_key("t", "r", &[("b", "2"), ("a", "1")]);
        assert_eq!(a, b);
        assert_eq!(a, "t:r:a:1|b:2");
    }

    #[test]
    fn test_generate_key_distinguishes_features() {
        assert_ne!(
            generate_key("explain", "John 3:16", &[]),
            generate_key("context", "John 3:16", &[])
        );
    }

    #[test]
    fn test_cache_set_get() {
        let cache = ResponseCache::new();
        cache.set("context:John 3:16", json!({"reference": "John 3:16"}));
        assert_eq!(
            cache.get("context:John 3:16"),
            Some(json!({"reference": "John 3:16"}))
        );
    }

    #[test]
    fn test_cache_miss() {
        let cache: ResponseCache = ResponseCache::new();
        assert!(cache.get("explain:Nowhere 1:1").is_none());
    }

    #[test]
    fn test_keys_are_exact() {
        let cache = ResponseCache::new();
        cache.set("context:John 3:16", json!(1));
        assert!(cache.get("context:john 3:16").is_none());
    }

    #[test]
    fn test_expired_entry_is_absent_without_sweep() {
        let cache = ResponseCache::new();
        cache.insert_expiring_at("k", json!("stale"), past());
        assert_eq!(cache.len(), 1);

        assert!(cache.get("k").is_none());
        // Lazy eviction removed it physically.
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_ttl_expiration() {
        let cache = ResponseCache::new();
        cache.set_with_ttl("k", json!(1), Ttl::After(Duration::from_millis(1)));
        std::thread::sleep(Duration::from_millis(10));
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_never_expires() {
        let cache = ResponseCache::new();
        cache.set_with_ttl("k", json!(1), Ttl::Never);
        let info = cache.entry("k").unwrap();
        assert_eq!(info.expires_at, None);
        assert_eq!(cache.cleanup_expired(), 0);
        assert_eq!(cache.get("k"), Some(json!(1)));
    }

    #[test]
    fn test_default_ttl_is_seven_days() {
        let cache = ResponseCache::new();
        cache.set("k", json!(1));
        let info = cache.entry("k").unwrap();
        let ttl = info.expires_at.unwrap() - info.created_at;
        assert_eq!(ttl.num_days(), 7);
    }

    #[test]
    fn test_repeated_set_keeps_value_and_refreshes_timestamps() {
        let cache = ResponseCache::new();
        cache.set("k", json!({"v": 1}));
        let first = cache.entry("k").unwrap();

        std::thread::sleep(Duration::from_millis(5));
        cache.set("k", json!({"v": 1}));
        let second = cache.entry("k").unwrap();

        assert_eq!(cache.get("k"), Some(json!({"v": 1})));
        assert_eq!(cache.len(), 1);
        assert!(second.created_at > first.created_at);
        assert!(second.expires_at.unwrap() > first.expires_at.unwrap());
    }

    #[test]
    fn test_overwrite_replaces_expiry() {
        let cache = ResponseCache::new();
        cache.insert_expiring_at("k", json!("old"), past());
        cache.set("k", json!("new"));
        assert_eq!(cache.get("k"), Some(json!("new")));
    }

    #[test]
    fn test_cache_remove() {
        let cache = ResponseCache::new();
        cache.set("k", json!(1));
        cache.remove("k");
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_cache_clear() {
        let cache = ResponseCache::new();
        cache.set("a", json!(1));
        cache.set_with_ttl("b", json!(2), Ttl::Never);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cleanup_expired() {
        let cache = ResponseCache::new();
        cache.insert_expiring_at("stale", json!(1), past());
        cache.set("fresh", json!(2));
        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("fresh").is_some());
    }

    #[test]
    fn test_cache_stats() {
        let cache = ResponseCache::new();
        cache.set("a", json!(1));
        cache.set("b", json!(2));
        let stats = cache.stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.note, "In-memory cache - resets on server restart");
    }

    #[test]
    fn test_entry_hides_expired() {
        let cache = ResponseCache::new();
        cache.insert_expiring_at("k", json!(1), past());
        assert!(cache.entry("k").is_none());
    }

    #[test]
    fn test_typed_values() {
        let cache: ResponseCache<Vec<String>> = ResponseCache::new();
        cache.set("explain:John 3:16", vec!["A".to_string()]);
        assert_eq!(cache.get("explain:John 3:16"), Some(vec!["A".to_string()]));
    }

    proptest! {
        #[test]
        fn prop_generate_key_order_invariant(
            feature in "[a-z]{1,10}",
            reference in "[A-Za-z0-9 :]{1,20}",
            params in proptest::collection::btree_map("[a-z]{1,6}", "[A-Za-z0-9]{0,6}", 0..6),
        ) {
            let forward: Vec<(&str, &str)> =
                params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            let mut reversed = forward.clone();
            reversed.reverse();
            prop_assert_eq!(
                generate_key(&feature, &reference, &forward),
                generate_key(&feature, &reference, &reversed)
            );
        }
    }
}
