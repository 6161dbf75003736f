//! Core domain types for the wayrank routing engine.
//!
//! The crate defines the canonical [`Point`] type and its boundary encoding
//! [`PointInput`], the itinerary types produced by a [`Ranker`], the provider
//! traits the ranker consumes, and the [`ExpiringCache`] shared by provider
//! adapters.
//!
//! Responsibilities:
//! - Validate coordinates and request shapes before any network access.
//! - Describe provider contracts without depending on an HTTP client.
//! - Keep all mutable state explicit; the crate holds no globals.

pub mod cache;
mod itinerary;
mod matrix;
mod place;
mod point;
mod profile;
pub mod provider;
mod solver;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cache::{CacheConfig, ExpiringCache};
pub use itinerary::{Leg, OptimalRoute, RankedDestination, RankedItinerary, round_to};
pub use matrix::{CostMatrix, CostMatrixError, CostTable, Table};
pub use place::Place;
pub use point::{Point, PointError, PointInput};
pub use profile::{Overview, ParseOverviewError, ParseProfileError, Profile};
pub use provider::{
    ErrorKind, Geocoder, MatrixProvider, PathGeometry, ProviderError, RouteCandidate, RouteDetail,
    RouteProvider, RouteQuery, RouteSummary,
};
pub use solver::{
    DEFAULT_ORIGIN_LABEL, DESTINATION_COUNT, RankError, RankPayload, RankRequest, Ranker,
    default_destination_label,
};
