//! HTTP adapters for the wayrank engine.
//!
//! Responsibilities:
//! - Implement the provider traits from `wayrank-core` over HTTP.
//! - Apply each service's failure policy: geocoding retries transient
//!   failures, matrix and route lookups fail on the first error.
//! - Share one expiring response cache across providers.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `wayrank-core`).
//! - Keep async I/O behind the synchronous provider traits.
//!
//! # Runtime requirements
//!
//! Providers block on their requests. When called from within an existing
//! Tokio runtime, that runtime must be multi-threaded; from a
//! `current_thread` runtime the provider falls back to its own runtime, which
//! may deadlock if the caller's runtime drives IO the request depends on.

pub mod cache;
pub mod geocoding;
mod http;
pub mod routing;

pub use cache::{CachedResponse, ResponseCache};
pub use geocoding::{HttpGeocoder, HttpGeocoderConfig, RetryPolicy};
pub use http::{DEFAULT_USER_AGENT, ProviderBuildError};
pub use routing::{HttpRoutingProvider, HttpRoutingProviderConfig};
