//! Provider traits and their reference forwarding impls.

use std::sync::Arc;

use crate::{CostTable, Place, Point, Profile};

use super::error::ProviderError;
use super::route::{RouteDetail, RouteQuery};

/// Fetch pairwise distances and durations for an ordered point list.
///
/// Implementers return the upstream tables as received; callers validate them
/// with [`CostMatrix::from_table`](crate::CostMatrix::from_table).
///
/// # Examples
///
/// ```rust
/// use wayrank_core::{CostTable, MatrixProvider, Point, Profile, ProviderError};
///
/// struct ZeroProvider;
///
/// impl MatrixProvider for ZeroProvider {
///     fn cost_table(&self, points: &[Point], _profile: Profile) -> Result<CostTable, ProviderError> {
///         if points.is_empty() {
///             return Err(ProviderError::EmptyInput);
///         }
///         let rows = vec![vec![Some(0.0); points.len()]; points.len()];
///         Ok(CostTable { distances: Some(rows.clone()), durations: Some(rows) })
///     }
/// }
///
/// let point = Point::new("A", 0.0, 0.0).unwrap();
/// let table = ZeroProvider.cost_table(&[point], Profile::Car)?;
/// assert_eq!(table.distances.map(|rows| rows.len()), Some(1));
/// # Ok::<(), ProviderError>(())
/// ```
pub trait MatrixProvider {
    /// Return the cost tables for `points` under `profile`.
    ///
    /// Implementations must return `Err(ProviderError::EmptyInput)` when
    /// `points` is empty.
    fn cost_table(&self, points: &[Point], profile: Profile) -> Result<CostTable, ProviderError>;
}

/// Fetch a detailed route between two points.
pub trait RouteProvider {
    /// Return every alternative the provider offers for `query`.
    fn route(&self, query: &RouteQuery) -> Result<RouteDetail, ProviderError>;
}

/// Resolve free text into candidate places.
pub trait Geocoder {
    /// Return at most `limit` candidates for `query`, best first.
    ///
    /// A blank query yields an empty list without contacting the provider.
    fn geocode(&self, query: &str, limit: u32) -> Result<Vec<Place>, ProviderError>;
}

impl<T: MatrixProvider + ?Sized> MatrixProvider for &T {
    fn cost_table(&self, points: &[Point], profile: Profile) -> Result<CostTable, ProviderError> {
        (**self).cost_table(points, profile)
    }
}

impl<T: RouteProvider + ?Sized> RouteProvider for &T {
    fn route(&self, query: &RouteQuery) -> Result<RouteDetail, ProviderError> {
        (**self).route(query)
    }
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn geocode(&self, query: &str, limit: u32) -> Result<Vec<Place>, ProviderError> {
        (**self).geocode(query, limit)
    }
}

impl<T: MatrixProvider + ?Sized> MatrixProvider for Arc<T> {
    fn cost_table(&self, points: &[Point], profile: Profile) -> Result<CostTable, ProviderError> {
        (**self).cost_table(points, profile)
    }
}

impl<T: RouteProvider + ?Sized> RouteProvider for Arc<T> {
    fn route(&self, query: &RouteQuery) -> Result<RouteDetail, ProviderError> {
        (**self).route(query)
    }
}
