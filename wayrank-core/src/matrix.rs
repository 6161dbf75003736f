//! Pairwise travel cost tables.
//!
//! A [`CostTable`] is what a matrix provider hands back: two optional
//! sub-tables exactly as the upstream service produced them. A [`CostMatrix`]
//! is the validated, square form the ranker works with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw sub-table; `None` cells mark pairs with no route.
pub type Table = Vec<Vec<Option<f64>>>;

/// Distance and duration tables as returned by a matrix provider.
///
/// Either table may be missing; [`CostMatrix::from_table`] decides whether the
/// response is usable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostTable {
    /// Distances in meters; `distances[i][j]` runs from point `i` to `j`.
    pub distances: Option<Table>,
    /// Durations in seconds, indexed like `distances`.
    pub durations: Option<Table>,
}

/// Reasons a [`CostTable`] cannot become a [`CostMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostMatrixError {
    /// The distance table was absent or empty.
    #[error("distance table is missing or empty")]
    MissingDistances,
    /// The duration table was absent or empty.
    #[error("duration table is missing or empty")]
    MissingDurations,
    /// A table was not `expected × expected`.
    #[error("{table} table is not {expected}x{expected}")]
    Dimension {
        table: &'static str,
        expected: usize,
    },
}

/// Validated square distance/duration matrix over an ordered point list.
///
/// Unreachable or invalid cells (null, negative, NaN) are stored as
/// `f64::INFINITY` so they can never win a minimisation.
///
/// # Examples
/// ```
/// use wayrank_core::{CostMatrix, CostTable};
///
/// let table = CostTable {
///     distances: Some(vec![vec![Some(0.0), Some(10.0)], vec![Some(12.0), Some(0.0)]]),
///     durations: Some(vec![vec![Some(0.0), Some(2.0)], vec![None, Some(0.0)]]),
/// };
/// let matrix = CostMatrix::from_table(table, 2).unwrap();
/// assert_eq!(matrix.distance(1, 0), Some(12.0));
/// assert_eq!(matrix.duration(1, 0), Some(f64::INFINITY));
/// assert_eq!(matrix.distance(2, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    distances: Vec<Vec<f64>>,
    durations: Vec<Vec<f64>>,
}

impl CostMatrix {
    /// Validate `table` as an `expected × expected` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`CostMatrixError`] when either sub-table is missing, empty or
    /// has the wrong shape.
    pub fn from_table(table: CostTable, expected: usize) -> Result<Self, CostMatrixError> {
        let distances = table
            .distances
            .filter(|rows| !rows.is_empty())
            .ok_or(CostMatrixError::MissingDistances)?;
        let durations = table
            .durations
            .filter(|rows| !rows.is_empty())
            .ok_or(CostMatrixError::MissingDurations)?;
        Ok(Self {
            distances: square(distances, expected, "distance")?,
            durations: square(durations, expected, "duration")?,
        })
    }

    /// Number of points the matrix covers.
    #[must_use]
    pub fn size(&self) -> usize {
        self.distances.len()
    }

    /// Distance in meters from point `from` to point `to`.
    #[must_use]
    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        cell(&self.distances, from, to)
    }

    /// Duration in seconds from point `from` to point `to`.
    #[must_use]
    pub fn duration(&self, from: usize, to: usize) -> Option<f64> {
        cell(&self.durations, from, to)
    }
}

fn square(
    rows: Table,
    expected: usize,
    table: &'static str,
) -> Result<Vec<Vec<f64>>, CostMatrixError> {
    if rows.len() != expected || rows.iter().any(|row| row.len() != expected) {
        return Err(CostMatrixError::Dimension { table, expected });
    }
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(finite_or_unreachable).collect())
        .collect())
}

fn finite_or_unreachable(value: Option<f64>) -> f64 {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(f64::INFINITY)
}

fn cell(rows: &[Vec<f64>], from: usize, to: usize) -> Option<f64> {
    rows.get(from).and_then(|row| row.get(to)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn unit_table(size: usize) -> Table {
        (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| Some(if i == j { 0.0 } else { 1.0 }))
                    .collect()
            })
            .collect()
    }

    #[fixture]
    fn table() -> CostTable {
        CostTable {
            distances: Some(unit_table(3)),
            durations: Some(unit_table(3)),
        }
    }

    #[rstest]
    fn accepts_square_tables(table: CostTable) {
        let matrix = CostMatrix::from_table(table, 3).expect("valid");
        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.distance(0, 0), Some(0.0));
        assert_eq!(matrix.duration(2, 1), Some(1.0));
    }

    #[rstest]
    fn rejects_missing_distances(mut table: CostTable) {
        table.distances = None;
        assert_eq!(
            CostMatrix::from_table(table, 3),
            Err(CostMatrixError::MissingDistances)
        );
    }

    #[rstest]
    fn rejects_empty_durations(mut table: CostTable) {
        table.durations = Some(Vec::new());
        assert_eq!(
            CostMatrix::from_table(table, 3),
            Err(CostMatrixError::MissingDurations)
        );
    }

    #[rstest]
    fn rejects_wrong_dimension(table: CostTable) {
        let err = CostMatrix::from_table(table, 5).expect_err("wrong size");
        assert_eq!(
            err,
            CostMatrixError::Dimension {
                table: "distance",
                expected: 5
            }
        );
    }

    #[rstest]
    fn rejects_ragged_rows(mut table: CostTable) {
        if let Some(rows) = table.durations.as_mut() {
            rows.push(vec![Some(1.0)]);
            rows.remove(0);
        }
        let err = CostMatrix::from_table(table, 3).expect_err("ragged");
        assert!(matches!(
            err,
            CostMatrixError::Dimension {
                table: "duration",
                ..
            }
        ));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(-1.0))]
    #[case(Some(f64::NAN))]
    fn invalid_cells_become_unreachable(#[case] value: Option<f64>) {
        let table = CostTable {
            distances: Some(vec![vec![Some(0.0), value], vec![Some(1.0), Some(0.0)]]),
            durations: Some(vec![vec![Some(0.0), Some(1.0)], vec![Some(1.0), Some(0.0)]]),
        };
        let matrix = CostMatrix::from_table(table, 2).expect("valid shape");
        assert_eq!(matrix.distance(0, 1), Some(f64::INFINITY));
    }
}
