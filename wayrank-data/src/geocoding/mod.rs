//! Place search with bounded retries.
//!
//! [`HttpGeocoder`] implements [`wayrank_core::Geocoder`] against a
//! Nominatim-compatible service. Unlike the routing providers it retries
//! transient failures according to a [`RetryPolicy`].

mod provider;
mod retry;

pub use provider::{DEFAULT_GEOCODER_URL, HttpGeocoder, HttpGeocoderConfig};
pub use retry::RetryPolicy;
