//! Bounded key-value store with time-based expiry.
//!
//! [`ExpiringCache`] holds no lock of its own; callers that share one across
//! threads wrap it in a mutex. Every operation has an `_at` variant taking an
//! explicit [`Instant`] so expiry can be tested without sleeping.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Expiry and capacity settings for an [`ExpiringCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum age before an entry is treated as stale.
    pub ttl: Duration,
    /// Maximum number of entries held at once.
    pub max_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_size: 1024,
        }
    }
}

impl CacheConfig {
    /// Override the time-to-live.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Override the capacity.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
    seq: u64,
}

/// Key-value store whose entries expire `ttl` after insertion.
///
/// Reads lazily drop stale entries. Inserting past `max_size` evicts the
/// single entry with the oldest insertion time, found by a linear scan; ties
/// on the timestamp go to the entry inserted first.
///
/// # Examples
/// ```
/// use std::time::{Duration, Instant};
/// use wayrank_core::{CacheConfig, ExpiringCache};
///
/// let mut cache = ExpiringCache::new(CacheConfig::default().with_ttl(Duration::from_secs(5)));
/// let start = Instant::now();
/// cache.insert_at("k", 1, start);
/// assert_eq!(cache.get_at(&"k", start + Duration::from_secs(5)), Some(1));
/// assert_eq!(cache.get_at(&"k", start + Duration::from_secs(6)), None);
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ExpiringCache<K, V> {
    config: CacheConfig,
    entries: HashMap<K, Entry<V>>,
    next_seq: u64,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty cache.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Settings the cache was built with.
    #[must_use]
    pub const fn config(&self) -> CacheConfig {
        self.config
    }

    /// Look up `key` against the current time.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Look up `key` as of `now`, removing it if it has expired.
    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.inserted_at) > self.config.ttl {
            self.entries.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Store `value` under `key` with the current time.
    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Store `value` under `key` as of `now`, evicting the oldest entry if the
    /// cache grows past capacity.
    pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
                seq,
            },
        );
        while self.entries.len() > self.config.max_size {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| (entry.inserted_at, entry.seq))
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    /// Number of entries, including any not yet lazily expired.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
