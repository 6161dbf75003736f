//! HTTP geocoder backed by a Nominatim-compatible search service.

use std::time::Duration;

use log::{debug, warn};
use reqwest::StatusCode;
use wayrank_core::{Geocoder, Place, ProviderError};

use super::retry::{self, Attempt, RetryPolicy};
use crate::cache::{self, CachedResponse, ResponseCache};
use crate::http::{BlockingClient, DEFAULT_USER_AGENT, ProviderBuildError};

/// Default search service location.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Longest upstream error body kept in an error message.
const ERROR_BODY_LIMIT: usize = 200;

/// Configuration for [`HttpGeocoder`].
#[derive(Debug, Clone)]
pub struct HttpGeocoderConfig {
    /// Base URL of the search service.
    pub base_url: String,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// User agent identifying this client to the service.
    pub user_agent: String,
    /// Handling of transient failures.
    pub retry: RetryPolicy,
}

impl Default for HttpGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl HttpGeocoderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Retrying [`Geocoder`] for a Nominatim-style `/search` endpoint.
///
/// Blank queries short-circuit to an empty list. Otherwise the cache is
/// consulted first; on a miss the search is attempted under the configured
/// [`RetryPolicy`]:
///
/// - transport failures, timeouts, HTTP 429 and HTTP 503 are retried;
/// - HTTP 403 fails at once with [`ProviderError::Blocked`];
/// - any other non-2xx status fails at once with [`ProviderError::HttpError`].
///
/// Only successful responses are cached.
///
/// # Example
///
/// ```no_run
/// use wayrank_core::Geocoder;
/// use wayrank_data::{HttpGeocoder, HttpGeocoderConfig, ResponseCache};
///
/// let geocoder = HttpGeocoder::with_config(
///     HttpGeocoderConfig::default().with_user_agent("my-app/1.0 (ops@example.com)"),
///     ResponseCache::default(),
/// )?;
/// for place in geocoder.geocode("Azadi Tower", 3)? {
///     println!("{} ({}, {})", place.display_name, place.lat, place.lon);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct HttpGeocoder {
    http: BlockingClient,
    retry: RetryPolicy,
    cache: ResponseCache,
}

impl HttpGeocoder {
    /// Create a geocoder with default configuration and a private cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpGeocoderConfig::new(base_url), ResponseCache::default())
    }

    /// Create a geocoder with explicit configuration and a shared cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(
        config: HttpGeocoderConfig,
        cache: ResponseCache,
    ) -> Result<Self, ProviderBuildError> {
        let http = BlockingClient::build(&config.base_url, &config.user_agent, config.timeout)?;
        Ok(Self {
            http,
            retry: config.retry,
            cache,
        })
    }

    async fn search_once(&self, url: &str, query: &str, limit: u32) -> Attempt<Vec<Place>> {
        let response = match self
            .http
            .client()
            .get(url)
            .query(&[("q", query), ("format", "jsonv2"), ("addressdetails", "1")])
            .query(&[("limit", limit)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return Attempt::from(Err(self.http.convert_error(&err, url))),
        };

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Attempt::Fail(ProviderError::Blocked {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("geocoding error {status}: {}", truncate(&body));
            return Attempt::from(Err(ProviderError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: truncate(&body),
            }));
        }

        Attempt::from(
            response
                .json::<Vec<Place>>()
                .await
                .map_err(|err| ProviderError::ParseError {
                    message: err.to_string(),
                }),
        )
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}

impl Geocoder for HttpGeocoder {
    fn geocode(&self, query: &str, limit: u32) -> Result<Vec<Place>, ProviderError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let key = cache::geocode_key(query, limit);
        if let Some(places) = self.cache.places(&key) {
            return Ok(places);
        }

        let url = self.http.endpoint("/search");
        debug!("searching {url} for {query:?} (limit {limit})");
        let places = self
            .http
            .block_on(retry::run(self.retry, |_| self.search_once(&url, query, limit)))
            .inspect_err(|err| warn!("geocoding {query:?} failed: {err}"))?;
        self.cache.insert(key, CachedResponse::Places(places.clone()));
        Ok(places)
    }
}
