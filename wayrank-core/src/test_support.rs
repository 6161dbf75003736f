//! Test-only provider doubles used by unit and behaviour tests.
//!
//! Every double counts its calls so tests can assert that no upstream access
//! happened.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    CostTable, Geocoder, MatrixProvider, PathGeometry, Place, Point, Profile, ProviderError,
    RouteCandidate, RouteDetail, RouteProvider, RouteQuery, Table,
};

/// `MatrixProvider` serving a fixed table, or a fixed error.
#[derive(Debug)]
pub struct TableMatrixProvider {
    response: Result<CostTable, ProviderError>,
    calls: AtomicUsize,
}

impl TableMatrixProvider {
    /// Serve `distances` and `durations` for every request.
    pub fn new(distances: Table, durations: Table) -> Self {
        Self::with_response(Ok(CostTable {
            distances: Some(distances),
            durations: Some(durations),
        }))
    }

    /// Serve a `size × size` table with `cost` off the diagonal and zero on it.
    pub fn uniform(size: usize, cost: f64) -> Self {
        let rows: Table = (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| Some(if i == j { 0.0 } else { cost }))
                    .collect()
            })
            .collect();
        Self::new(rows.clone(), rows)
    }

    /// Fail every request with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_response(Err(error))
    }

    /// Serve an arbitrary response.
    pub fn with_response(response: Result<CostTable, ProviderError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests that reached the provider.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MatrixProvider for TableMatrixProvider {
    fn cost_table(&self, points: &[Point], _profile: Profile) -> Result<CostTable, ProviderError> {
        if points.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// `RouteProvider` answering each call with a straight two-point route.
///
/// Calls are numbered from zero in arrival order; chosen calls can be made to
/// fail or to return no candidates.
#[derive(Debug)]
pub struct StubRouteProvider {
    distance_m: f64,
    duration_s: f64,
    failing: HashSet<usize>,
    empty: HashSet<usize>,
    queries: Mutex<Vec<RouteQuery>>,
}

impl StubRouteProvider {
    /// Answer every call with one candidate of the given cost.
    pub fn new(distance_m: f64, duration_s: f64) -> Self {
        Self {
            distance_m,
            duration_s,
            failing: HashSet::new(),
            empty: HashSet::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Make call `index` fail with a network error.
    #[must_use]
    pub fn failing_on(mut self, index: usize) -> Self {
        self.failing.insert(index);
        self
    }

    /// Make call `index` succeed with no candidates.
    #[must_use]
    pub fn empty_on(mut self, index: usize) -> Self {
        self.empty.insert(index);
        self
    }

    /// Queries received so far, in order.
    pub fn queries(&self) -> Vec<RouteQuery> {
        self.queries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of requests that reached the provider.
    pub fn calls(&self) -> usize {
        self.queries().len()
    }
}

impl RouteProvider for StubRouteProvider {
    fn route(&self, query: &RouteQuery) -> Result<RouteDetail, ProviderError> {
        let index = {
            let mut queries = self
                .queries
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            queries.push(query.clone());
            queries.len() - 1
        };
        if self.failing.contains(&index) {
            return Err(ProviderError::NetworkError {
                url: "stub://route".to_owned(),
                message: format!("call {index} configured to fail"),
            });
        }
        if self.empty.contains(&index) {
            return Ok(RouteDetail::default());
        }
        let geometry = PathGeometry::new(vec![query.origin, query.destination]);
        let raw = serde_json::json!({
            "code": "Ok",
            "routes": [{
                "distance": self.distance_m,
                "duration": self.duration_s,
                "geometry": &geometry,
                "legs": [],
            }],
            "waypoints": [],
        });
        Ok(RouteDetail {
            routes: vec![RouteCandidate {
                distance_m: self.distance_m,
                duration_s: self.duration_s,
                geometry: Some(geometry),
            }],
            raw,
        })
    }
}

/// `Geocoder` returning a fixed candidate list for any non-blank query.
#[derive(Debug, Default)]
pub struct FixedGeocoder {
    places: Vec<Place>,
    calls: AtomicUsize,
}

impl FixedGeocoder {
    /// Serve `places` for every non-blank query.
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            places,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests that reached the provider.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FixedGeocoder {
    fn geocode(&self, query: &str, limit: u32) -> Result<Vec<Place>, ProviderError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self.places.iter().take(limit).cloned().collect())
    }
}
