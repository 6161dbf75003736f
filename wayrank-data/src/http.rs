//! Blocking bridge between the synchronous provider traits and async reqwest.
//!
//! Each HTTP provider owns a [`BlockingClient`]: a reqwest [`Client`] plus a
//! current-thread Tokio runtime reused across calls.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;
use wayrank_core::ProviderError;

/// Default user agent sent to every upstream service.
pub const DEFAULT_USER_AGENT: &str = "wayrank/0.1";

/// Errors raised while constructing an HTTP provider.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The configured base URL is not an absolute URL.
    #[error("invalid base URL {url:?}: {source}")]
    BaseUrl {
        /// The rejected value.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The configured base URL parsed but is not an `http(s)` URL with a host.
    #[error("base URL {url:?} must be an http or https URL with a host")]
    UnsupportedBaseUrl {
        /// The rejected value.
        url: String,
    },
}

pub(crate) struct BlockingClient {
    client: Client,
    runtime: Runtime,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingClient {
    pub(crate) fn build(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderBuildError> {
        let parsed = Url::parse(base_url).map_err(|source| ProviderBuildError::BaseUrl {
            url: base_url.to_owned(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
            return Err(ProviderBuildError::UnsupportedBaseUrl {
                url: base_url.to_owned(),
            });
        }
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
        })
    }

    pub(crate) const fn client(&self) -> &Client {
        &self.client
    }

    /// `path` appended to the base URL; `path` must start with `/`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Drive `future` to completion from synchronous code.
    ///
    /// Inside a multi-threaded Tokio runtime the caller's handle is reused via
    /// [`tokio::task::block_in_place`]. Outside any runtime, or inside a
    /// `current_thread` runtime, the owned runtime is used instead; the latter
    /// may deadlock if the caller's runtime drives IO this request needs.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    pub(crate) fn convert_error(&self, error: &reqwest::Error, url: &str) -> ProviderError {
        if error.is_timeout() {
            return ProviderError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return ProviderError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        ProviderError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// `lon,lat` pairs joined by `;`, the coordinate list format routing services
/// expect in request paths.
pub(crate) fn coordinate_list<'a>(coords: impl IntoIterator<Item = &'a geo::Coord<f64>>) -> String {
    coords
        .into_iter()
        .map(|coord| format!("{},{}", coord.x, coord.y))
        .collect::<Vec<_>>()
        .join(";")
}
