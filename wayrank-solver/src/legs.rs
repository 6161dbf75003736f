//! Per-leg detail for the winning order.

use log::warn;
use wayrank_core::{
    CostMatrix, Leg, Overview, Point, Profile, RankedDestination, RouteProvider, RouteQuery,
};

/// Build the ranked destinations for `order`, one leg per destination.
///
/// `points` is the origin followed by the destinations, indexed like
/// `matrix`. Each leg asks `routes` for detail; a failed lookup or one with no
/// candidates falls back to the matrix cell and leaves the geometry empty.
/// The closing leg back to the origin, if any, is not part of the result.
pub(crate) fn reconstruct<R: RouteProvider>(
    routes: &R,
    matrix: &CostMatrix,
    points: &[Point],
    order: &[usize],
    profile: Profile,
) -> Vec<RankedDestination> {
    let mut from_index = 0;
    let mut ranked = Vec::with_capacity(order.len());
    for (rank, &destination) in (1..).zip(order) {
        let to_index = destination + 1;
        let (Some(from), Some(to)) = (points.get(from_index), points.get(to_index)) else {
            continue;
        };
        ranked.push(RankedDestination {
            rank,
            label: to.label().to_owned(),
            lat: to.lat(),
            lon: to.lon(),
            leg: leg(routes, matrix, (from_index, from), (to_index, to), profile),
        });
        from_index = to_index;
    }
    ranked
}

fn leg<R: RouteProvider>(
    routes: &R,
    matrix: &CostMatrix,
    (from_index, from): (usize, &Point),
    (to_index, to): (usize, &Point),
    profile: Profile,
) -> Leg {
    let query = RouteQuery::between(from, to, profile, Overview::Full);
    match routes.route(&query) {
        Ok(detail) => {
            if let Some(best) = detail.best() {
                return Leg {
                    from: from.label().to_owned(),
                    distance_m: best.distance_m,
                    duration_s: best.duration_s,
                    geometry: best.geometry.clone(),
                };
            }
            warn!(
                "no route candidates from {} to {}; using matrix values",
                from.label(),
                to.label()
            );
        }
        Err(err) => warn!(
            "route lookup from {} to {} failed: {err}; using matrix values",
            from.label(),
            to.label()
        ),
    }
    Leg {
        from: from.label().to_owned(),
        distance_m: matrix.distance(from_index, to_index).unwrap_or(f64::INFINITY),
        duration_s: matrix.duration(from_index, to_index).unwrap_or(f64::INFINITY),
        geometry: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use wayrank_core::test_support::StubRouteProvider;
    use wayrank_core::{CostTable, Table};

    #[fixture]
    fn points() -> Vec<Point> {
        // Two destinations at the same coordinates as the origin.
        vec![
            Point::new("Origin", 1.0, 1.0).expect("valid"),
            Point::new("Twin", 1.0, 1.0).expect("valid"),
            Point::new("Other", 2.0, 2.0).expect("valid"),
        ]
    }

    fn matrix() -> CostMatrix {
        let rows: Table = vec![
            vec![Some(0.0), Some(11.0), Some(12.0)],
            vec![Some(21.0), Some(0.0), Some(23.0)],
            vec![Some(31.0), Some(32.0), Some(0.0)],
        ];
        CostMatrix::from_table(
            CostTable {
                distances: Some(rows.clone()),
                durations: Some(rows),
            },
            3,
        )
        .expect("valid matrix")
    }

    #[rstest]
    fn fallback_uses_positions_not_coordinates(points: Vec<Point>) {
        let routes = StubRouteProvider::new(1.0, 1.0).failing_on(0).failing_on(1);

        let ranked = reconstruct(&routes, &matrix(), &points, &[1, 0], Profile::Car);

        let legs: Vec<_> = ranked.iter().map(|r| (r.leg.from.as_str(), r.leg.distance_m)).collect();
        assert_eq!(legs, vec![("Origin", 12.0), ("Other", 32.0)]);
        assert!(ranked.iter().all(|r| r.leg.geometry.is_none()));
    }

    #[rstest]
    fn successful_lookups_carry_geometry(points: Vec<Point>) {
        let routes = StubRouteProvider::new(5.0, 6.0);

        let ranked = reconstruct(&routes, &matrix(), &points, &[0, 1], Profile::Bike);

        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.leg.geometry.is_some()));
        assert_eq!(
            ranked.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2]
        );
        let queries = routes.queries();
        assert!(queries.iter().all(|q| q.profile == Profile::Bike && q.overview == Overview::Full));
    }

    #[rstest]
    fn empty_candidates_fall_back(points: Vec<Point>) {
        let routes = StubRouteProvider::new(5.0, 6.0).empty_on(1);

        let ranked = reconstruct(&routes, &matrix(), &points, &[0, 1], Profile::Car);

        assert_eq!(ranked[0].leg.distance_m, 5.0);
        assert_eq!(ranked[1].leg.distance_m, 23.0);
        assert_eq!(ranked[1].leg.duration_s, 23.0);
    }
}
