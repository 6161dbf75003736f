//! HTTP routing provider backed by OSRM's Table and Route services.
//!
//! Both services share one policy: a single attempt per call. Any transport
//! failure, non-2xx status or non-`Ok` service code is returned to the caller
//! unchanged, and only successful responses are cached.

use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use wayrank_core::{
    CostTable, MatrixProvider, Point, Profile, ProviderError, RouteDetail, RouteProvider,
    RouteQuery,
};

use super::osrm::{self, RouteResponse, TableResponse};
use crate::cache::{self, CachedResponse, ResponseCache};
use crate::http::{BlockingClient, DEFAULT_USER_AGENT, ProviderBuildError, coordinate_list};

/// Default routing service location.
pub const DEFAULT_ROUTING_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`HttpRoutingProvider`].
#[derive(Debug, Clone)]
pub struct HttpRoutingProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpRoutingProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ROUTING_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpRoutingProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
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
}

/// OSRM-backed [`MatrixProvider`] and [`RouteProvider`].
///
/// The provider implements the synchronous traits by blocking on
/// asynchronous HTTP requests; see the crate docs for runtime requirements.
///
/// # Example
///
/// ```no_run
/// use wayrank_core::{MatrixProvider, Point, Profile};
/// use wayrank_data::{HttpRoutingProvider, HttpRoutingProviderConfig, ResponseCache};
///
/// let provider = HttpRoutingProvider::with_config(
///     HttpRoutingProviderConfig::new("http://localhost:5000"),
///     ResponseCache::default(),
/// )?;
/// let points = [
///     Point::new("A", 35.70, 51.40)?,
///     Point::new("B", 35.71, 51.41)?,
/// ];
/// let table = provider.cost_table(&points, Profile::Car)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct HttpRoutingProvider {
    http: BlockingClient,
    cache: ResponseCache,
}

impl HttpRoutingProvider {
    /// Create a provider with default configuration and a private cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRoutingProviderConfig::new(base_url), ResponseCache::default())
    }

    /// Create a provider with explicit configuration and a shared cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(
        config: HttpRoutingProviderConfig,
        cache: ResponseCache,
    ) -> Result<Self, ProviderBuildError> {
        let http = BlockingClient::build(&config.base_url, &config.user_agent, config.timeout)?;
        Ok(Self { http, cache })
    }

    /// `{base_url}/table/v1/{profile}/{lon,lat;...}`
    fn table_url(&self, points: &[Point], profile: Profile) -> String {
        let coords: Vec<_> = points.iter().map(Point::location).collect();
        self.http
            .endpoint(&format!("/table/v1/{profile}/{}", coordinate_list(&coords)))
    }

    /// `{base_url}/route/v1/{profile}/{lon,lat};{lon,lat}`
    fn route_url(&self, query: &RouteQuery) -> String {
        self.http.endpoint(&format!(
            "/route/v1/{}/{}",
            query.profile,
            coordinate_list([&query.origin, &query.destination])
        ))
    }

    async fn fetch_table(&self, url: &str) -> Result<CostTable, ProviderError> {
        let response = self
            .http
            .client()
            .get(url)
            .query(&[("annotations", "distance,duration")])
            .send()
            .await
            .map_err(|err| self.http.convert_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.http.convert_error(&err, url))?;

        let table: TableResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::ParseError {
                message: err.to_string(),
            })?;

        if !osrm::is_ok(&table.code) {
            return Err(ProviderError::ServiceError {
                code: table.code,
                message: table.message.unwrap_or_default(),
            });
        }
        Ok(CostTable {
            distances: table.distances,
            durations: table.durations,
        })
    }

    async fn fetch_route(&self, url: &str, query: &RouteQuery) -> Result<RouteDetail, ProviderError> {
        let response = self
            .http
            .client()
            .get(url)
            .query(&[
                ("overview", query.overview.as_str()),
                ("geometries", "geojson"),
                ("steps", "true"),
                ("annotations", "duration,distance"),
            ])
            .send()
            .await
            .map_err(|err| self.http.convert_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.http.convert_error(&err, url))?;

        let body: Value = response
            .json()
            .await
            .map_err(|err| ProviderError::ParseError {
                message: err.to_string(),
            })?;
        let route =
            RouteResponse::deserialize(&body).map_err(|err| ProviderError::ParseError {
                message: err.to_string(),
            })?;

        if !osrm::is_ok(&route.code) {
            return Err(ProviderError::ServiceError {
                code: route.code,
                message: route.message.unwrap_or_default(),
            });
        }
        Ok(RouteDetail {
            raw: body,
            ..RouteDetail::from(route)
        })
    }
}

impl MatrixProvider for HttpRoutingProvider {
    fn cost_table(&self, points: &[Point], profile: Profile) -> Result<CostTable, ProviderError> {
        if points.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        let key = cache::table_key(profile, points);
        if let Some(table) = self.cache.table(&key) {
            return Ok(table);
        }

        let url = self.table_url(points, profile);
        debug!("requesting {}x{} table from {url}", points.len(), points.len());
        let table = self
            .http
            .block_on(self.fetch_table(&url))
            .inspect_err(|err| warn!("table request failed: {err}"))?;
        self.cache.insert(key, CachedResponse::Table(table.clone()));
        Ok(table)
    }
}

impl RouteProvider for HttpRoutingProvider {
    fn route(&self, query: &RouteQuery) -> Result<RouteDetail, ProviderError> {
        let key = cache::route_key(query);
        if let Some(detail) = self.cache.route(&key) {
            return Ok(detail);
        }

        let url = self.route_url(query);
        debug!("requesting route from {url}");
        let detail = self
            .http
            .block_on(self.fetch_route(&url, query))
            .inspect_err(|err| warn!("route request failed: {err}"))?;
        self.cache.insert(key, CachedResponse::Route(detail.clone()));
        Ok(detail)
    }
}
