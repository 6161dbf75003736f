//! Contracts for the upstream services the engine consumes.
//!
//! Three traits describe the providers: [`MatrixProvider`] for pairwise cost
//! tables, [`RouteProvider`] for detailed point-to-point routes and
//! [`Geocoder`] for free-text place search. They are synchronous so the core
//! stays embeddable outside an async runtime; adapters in `wayrank-data`
//! bridge to HTTP.
//!
//! Every provider failure is a [`ProviderError`]; [`ProviderError::kind`]
//! folds the variants into the blocked/unavailable taxonomy callers act on.

mod error;
mod route;
mod traits;

pub use error::{ErrorKind, ProviderError};
pub use route::{PathGeometry, RouteCandidate, RouteDetail, RouteQuery, RouteSummary};
pub use traits::{Geocoder, MatrixProvider, RouteProvider};
