use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

struct Entry {
    value: Value,
    expires_at: Instant,
}

/// In-process key-value cache with per-entry expiry and a prefix-based
/// invalidation sweep.
///
/// The cache is strictly an optimization layer over the store: `get` misses
/// on expired or absent keys, `set` and `invalidate_prefix` report success
/// as a boolean, and no method surfaces an error to the caller. Readers that
/// miss always fall through to the source of truth, so the worst failure
/// mode is a stale page bounded by the TTL.
pub struct Cache {
    entries: RwLock<HashMap<String, Entry>>,
    default_ttl: Duration,
}

impl Cache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Look up a key. Expired entries are removed and reported as absent.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value under the default TTL.
    pub async fn set(&self, key: &str, value: Value) -> bool {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Store a value with an explicit TTL.
    pub async fn set_with_ttl(&self, key: &str, value: Value, ttl: Duration) -> bool {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        true
    }

    /// Delete every key starting with `prefix`. Called after any mutation to
    /// drop all cached list pages at once.
    pub async fn invalidate_prefix(&self, prefix: &str) -> bool {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        debug!(
            "Cache invalidation for prefix '{}' removed {} entries",
            prefix,
            before - entries.len()
        );
        true
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
