//! Response cache shared by the HTTP providers.
//!
//! One [`ResponseCache`] is built at start-up and cloned into every provider;
//! clones share storage. Keys are namespaced per service so geocoding, table
//! and route responses never collide.

use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use wayrank_core::{CacheConfig, CostTable, ExpiringCache, Place, Point, Profile, RouteDetail, RouteQuery};

use crate::http::coordinate_list;

/// A cached upstream response.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedResponse {
    /// Geocoding candidates.
    Places(Vec<Place>),
    /// Distance and duration tables.
    Table(CostTable),
    /// Detailed route alternatives.
    Route(RouteDetail),
}

/// Thread-safe handle to an [`ExpiringCache`] of upstream responses.
///
/// # Examples
/// ```
/// use wayrank_core::CacheConfig;
/// use wayrank_data::{CachedResponse, ResponseCache};
///
/// let cache = ResponseCache::new(CacheConfig::default());
/// let shared = cache.clone();
/// cache.insert("geocode:Tehran:5".to_owned(), CachedResponse::Places(Vec::new()));
/// assert!(shared.get("geocode:Tehran:5").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ResponseCache {
    inner: Arc<Mutex<ExpiringCache<String, CachedResponse>>>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl ResponseCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ExpiringCache::new(config))),
        }
    }

    /// Look up a fresh response.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<CachedResponse> {
        let hit = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key.to_owned());
        debug!("cache {} for {key}", if hit.is_some() { "hit" } else { "miss" });
        hit
    }

    /// Store a response, evicting the oldest entry if the cache is full.
    pub fn insert(&self, key: String, value: CachedResponse) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn places(&self, key: &str) -> Option<Vec<Place>> {
        match self.get(key)? {
            CachedResponse::Places(places) => Some(places),
            _ => None,
        }
    }

    pub(crate) fn table(&self, key: &str) -> Option<CostTable> {
        match self.get(key)? {
            CachedResponse::Table(table) => Some(table),
            _ => None,
        }
    }

    pub(crate) fn route(&self, key: &str) -> Option<RouteDetail> {
        match self.get(key)? {
            CachedResponse::Route(detail) => Some(detail),
            _ => None,
        }
    }
}

pub(crate) fn geocode_key(query: &str, limit: u32) -> String {
    format!("geocode:{query}:{limit}")
}

pub(crate) fn table_key(profile: Profile, points: &[Point]) -> String {
    let coords: Vec<_> = points.iter().map(Point::location).collect();
    format!("table:{profile}:{}", coordinate_list(&coords))
}

pub(crate) fn route_key(query: &RouteQuery) -> String {
    format!(
        "route:{}:{}:{}",
        query.profile,
        coordinate_list([&query.origin, &query.destination]),
        query.overview
    )
}
