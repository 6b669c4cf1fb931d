//! Query cache abstraction.
//!
//! The service layer memoizes record sets behind the [`Cache`] trait instead
//! of process-global state. Values are stored as `serde_json::Value` so that
//! any serializable record set can be cached, and every entry carries a TTL.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::debug;

/// A key/value cache with per-entry expiry.
pub trait Cache: Send + Sync {
    /// Returns the value for `key` unless it is missing or expired.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key` for `ttl`.
    fn set(&self, key: &str, value: Value, ttl: Duration);

    /// Removes `key`.
    fn invalidate(&self, key: &str);
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: DateTime<Utc>,
}

/// In-process [`Cache`] backed by a hash map.
///
/// Expired entries are dropped lazily on read and by [`MemoryCache::purge_expired`].
///
/// # Example
///
/// ```
/// use studio_payroll::cache::{Cache, MemoryCache};
/// use chrono::Duration;
/// use serde_json::json;
///
/// let cache = MemoryCache::new();
/// cache.set("periods", json!(["2025-01"]), Duration::minutes(5));
/// assert_eq!(cache.get("periods"), Some(json!(["2025-01"])));
///
/// cache.invalidate("periods");
/// assert_eq!(cache.get("periods"), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns true when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes `key` only if it is still expired at `now`.
    ///
    /// The entry is re-checked under the write lock, so a value stored after
    /// the expired read survives.
    fn remove_if_expired(&self, key: &str, now: DateTime<Utc>) {
        if let Ok(mut entries) = self.entries.write() {
            if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
                entries.remove(key);
            }
        }
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        let now = Utc::now();
        if let Ok(mut entries) = self.entries.write() {
            let before = entries.len();
            entries.retain(|_, entry| entry.expires_at > now);
            let purged = before - entries.len();
            if purged > 0 {
                debug!(purged, "Purged expired cache entries");
            }
        }
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let now = Utc::now();
        {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => {
                    debug!(cache_key = %key, "Cache hit");
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        debug!(cache_key = %key, "Cache entry expired");
        self.remove_if_expired(key, now);
        None
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    value,
                    expires_at: Utc::now() + ttl,
                },
            );
        }
    }

    fn invalidate(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}
