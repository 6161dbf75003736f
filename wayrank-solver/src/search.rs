//! Exhaustive search for the cheapest visiting order.

use wayrank_core::CostMatrix;

use crate::permutations::Lexicographic;

/// A complete visiting order with its matrix totals.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tour {
    /// Destination positions (zero-based) in visiting order.
    pub(crate) order: Vec<usize>,
    pub(crate) distance_m: f64,
    pub(crate) duration_s: f64,
}

/// Matrix indices visited by `order`: the origin (index 0), each destination
/// (shifted by one) and, when `return_to_origin` is set, the origin again.
pub(crate) fn stops(order: &[usize], return_to_origin: bool) -> Vec<usize> {
    std::iter::once(0)
        .chain(order.iter().map(|&destination| destination + 1))
        .chain(return_to_origin.then_some(0))
        .collect()
}

/// Sum distance and duration along consecutive stops.
#[expect(
    clippy::float_arithmetic,
    reason = "tour totals are sums of floating-point matrix cells"
)]
pub(crate) fn evaluate(matrix: &CostMatrix, order: &[usize], return_to_origin: bool) -> (f64, f64) {
    stops(order, return_to_origin)
        .windows(2)
        .fold((0.0, 0.0), |(distance, duration), pair| match pair {
            [from, to] => (
                distance + matrix.distance(*from, *to).unwrap_or(f64::INFINITY),
                duration + matrix.duration(*from, *to).unwrap_or(f64::INFINITY),
            ),
            _ => (distance, duration),
        })
}

/// Evaluate every order of `destinations` destinations and keep the one with
/// the smallest total distance.
///
/// Orders are visited lexicographically and only a strictly smaller distance
/// replaces the incumbent, so the earliest order wins a tie. Returns `None`
/// when no order has a finite distance.
pub(crate) fn best_tour(
    matrix: &CostMatrix,
    destinations: usize,
    return_to_origin: bool,
) -> Option<Tour> {
    let mut best: Option<Tour> = None;
    for order in Lexicographic::new(destinations) {
        let (distance_m, duration_s) = evaluate(matrix, &order, return_to_origin);
        if best.as_ref().is_none_or(|incumbent| distance_m < incumbent.distance_m) {
            best = Some(Tour {
                order,
                distance_m,
                duration_s,
            });
        }
    }
    best.filter(|tour| tour.distance_m.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wayrank_core::CostTable;

    fn matrix(distances: [[f64; 3]; 3]) -> CostMatrix {
        let rows: Vec<Vec<Option<f64>>> = distances
            .iter()
            .map(|row| row.iter().copied().map(Some).collect())
            .collect();
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
    #[case(false, vec![0, 1, 2])]
    #[case(true, vec![0, 1, 2, 0])]
    fn stops_start_at_origin(#[case] closed: bool, #[case] expected: Vec<usize>) {
        assert_eq!(stops(&[0, 1], closed), expected);
    }

    #[rstest]
    fn closing_leg_is_added_to_totals() {
        let m = matrix([[0.0, 1.0, 10.0], [1.0, 0.0, 2.0], [7.0, 2.0, 0.0]]);
        assert_eq!(evaluate(&m, &[0, 1], false), (3.0, 3.0));
        assert_eq!(evaluate(&m, &[0, 1], true), (10.0, 10.0));
    }

    #[rstest]
    fn picks_cheapest_order() {
        let m = matrix([[0.0, 9.0, 1.0], [9.0, 0.0, 1.0], [1.0, 1.0, 0.0]]);
        let tour = best_tour(&m, 2, false).expect("finite tour");
        assert_eq!(tour.order, vec![1, 0]);
        assert_eq!(tour.distance_m, 2.0);
    }

    #[rstest]
    fn ties_keep_the_first_order() {
        let m = matrix([[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]]);
        let tour = best_tour(&m, 2, false).expect("finite tour");
        assert_eq!(tour.order, vec![0, 1]);
    }

    #[rstest]
    fn all_infinite_orders_yield_nothing() {
        let inf = f64::INFINITY;
        let m = matrix([[0.0, inf, inf], [inf, 0.0, 1.0], [inf, 1.0, 0.0]]);
        assert!(best_tour(&m, 2, false).is_none());
    }
}
