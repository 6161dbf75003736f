//! Facade crate for the wayrank place and route engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP providers
//! and the brute-force ranker behind feature flags.

#![forbid(unsafe_code)]

pub use wayrank_core::{
    CacheConfig, CostMatrix, CostMatrixError, CostTable, ErrorKind, ExpiringCache, Geocoder, Leg,
    MatrixProvider, OptimalRoute, Overview, PathGeometry, Place, Point, PointError, PointInput,
    Profile, ProviderError, RankError, RankPayload, RankRequest, RankedDestination,
    RankedItinerary, Ranker, RouteCandidate, RouteDetail, RouteProvider, RouteQuery, RouteSummary,
};

#[cfg(feature = "http")]
pub use wayrank_data::{
    HttpGeocoder, HttpGeocoderConfig, HttpRoutingProvider, HttpRoutingProviderConfig,
    ProviderBuildError, ResponseCache, RetryPolicy,
};

#[cfg(feature = "solver")]
pub use wayrank_solver::BruteForceRanker;
