//! `BruteForceRanker` implementation.

use log::{debug, info};
use wayrank_core::{
    CostMatrix, DESTINATION_COUNT, MatrixProvider, OptimalRoute, RankError, RankRequest,
    RankedItinerary, Ranker, RouteProvider,
};

use crate::legs::reconstruct;
use crate::search::best_tour;

/// Ranker that evaluates every visiting order of the four destinations.
///
/// One cost table is fetched per request; the 24 orders are scored from it
/// and the cheapest by total distance is kept. Detailed routes are then
/// fetched for the winning order only, leg by leg, falling back to the cost
/// table when a lookup fails.
///
/// The search is exhaustive, so it is sized for [`DESTINATION_COUNT`] and
/// nothing larger.
///
/// # Examples
/// ```rust
/// use wayrank_core::test_support::{StubRouteProvider, TableMatrixProvider};
/// use wayrank_core::{Point, Profile, RankRequest, Ranker};
/// use wayrank_solver::BruteForceRanker;
///
/// let ranker = BruteForceRanker::new(
///     TableMatrixProvider::uniform(5, 100.0),
///     StubRouteProvider::new(100.0, 10.0),
/// );
/// let request = RankRequest {
///     origin: Point::new("Origin", 0.0, 0.0).unwrap(),
///     destinations: (1..=4)
///         .map(|i| Point::new(format!("D{i}"), f64::from(i), 0.0).unwrap())
///         .collect(),
///     profile: Profile::Car,
///     return_to_origin: false,
/// };
/// let itinerary = ranker.rank(&request).unwrap();
/// assert_eq!(itinerary.labels().collect::<Vec<_>>(), ["D1", "D2", "D3", "D4"]);
/// ```
#[derive(Debug)]
pub struct BruteForceRanker<M, R>
where
    M: MatrixProvider,
    R: RouteProvider,
{
    matrix: M,
    routes: R,
}

impl<M, R> BruteForceRanker<M, R>
where
    M: MatrixProvider,
    R: RouteProvider,
{
    /// Construct a ranker over a matrix provider and a route provider.
    #[must_use]
    pub const fn new(matrix: M, routes: R) -> Self {
        Self { matrix, routes }
    }
}

impl<M, R> Ranker for BruteForceRanker<M, R>
where
    M: MatrixProvider + Send + Sync,
    R: RouteProvider + Send + Sync,
{
    fn rank(&self, request: &RankRequest) -> Result<RankedItinerary, RankError> {
        request.validate()?;
        let points = request.points();

        let table = self
            .matrix
            .cost_table(&points, request.profile)
            .map_err(RankError::ProviderUnavailable)?;
        let matrix =
            CostMatrix::from_table(table, points.len()).map_err(RankError::InvalidMatrix)?;

        let tour = best_tour(&matrix, DESTINATION_COUNT, request.return_to_origin)
            .ok_or(RankError::Unreachable)?;
        debug!("best order {:?} at {} m", tour.order, tour.distance_m);

        let ranked_destinations = reconstruct(
            &self.routes,
            &matrix,
            &points,
            &tour.order,
            request.profile,
        );
        let optimal_route = OptimalRoute {
            order: tour.order,
            total_distance_m: tour.distance_m,
            total_duration_s: tour.duration_s,
            return_to_origin: request.return_to_origin,
        };
        info!(
            "ranked {} destinations: {} km, {} min",
            ranked_destinations.len(),
            optimal_route.total_distance_km(),
            optimal_route.total_duration_min()
        );
        Ok(RankedItinerary {
            optimal_route,
            ranked_destinations,
        })
    }
}
