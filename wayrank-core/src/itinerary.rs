//! Ranked itineraries produced by a [`Ranker`](crate::Ranker).

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::PathGeometry;

/// Round `value` to `places` decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use wayrank_core::round_to;
///
/// assert_eq!(round_to(15.4205, 3), 15.421);
/// assert_eq!(round_to(90.0 / 60.0, 2), 1.5);
/// ```
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}

/// One directed edge of an itinerary.
///
/// `geometry` is present only when a detail-route lookup succeeded for the
/// leg; otherwise distance and duration come from the cost matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Label of the point the leg starts from.
    pub from: String,
    /// Length in meters.
    pub distance_m: f64,
    /// Travel time in seconds.
    pub duration_s: f64,
    /// Road geometry, when known.
    pub geometry: Option<PathGeometry>,
}

impl Leg {
    /// Length in kilometres, rounded to three places.
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        round_to(self.distance_m / 1000.0, 3)
    }

    /// Travel time in minutes, rounded to two places.
    #[must_use]
    pub fn duration_min(&self) -> f64 {
        round_to(self.duration_s / 60.0, 2)
    }
}

impl Serialize for Leg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Leg", 6)?;
        state.serialize_field("from", &self.from)?;
        state.serialize_field("distance_m", &self.distance_m)?;
        state.serialize_field("distance_km", &self.distance_km())?;
        state.serialize_field("duration_s", &self.duration_s)?;
        state.serialize_field("duration_min", &self.duration_min())?;
        state.serialize_field("geometry", &self.geometry)?;
        state.end()
    }
}

/// Aggregate cost of the chosen visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimalRoute {
    /// Destination positions (zero-based, in request order) in visiting order.
    pub order: Vec<usize>,
    /// Sum of matrix distances along the order, in meters.
    pub total_distance_m: f64,
    /// Sum of matrix durations along the order, in seconds.
    pub total_duration_s: f64,
    /// Whether the totals include a closing leg back to the origin.
    pub return_to_origin: bool,
}

impl OptimalRoute {
    /// Total distance in kilometres, rounded to three places.
    #[must_use]
    pub fn total_distance_km(&self) -> f64 {
        round_to(self.total_distance_m / 1000.0, 3)
    }

    /// Total duration in minutes, rounded to two places.
    #[must_use]
    pub fn total_duration_min(&self) -> f64 {
        round_to(self.total_duration_s / 60.0, 2)
    }
}

impl Serialize for OptimalRoute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OptimalRoute", 6)?;
        state.serialize_field("order", &self.order)?;
        state.serialize_field("total_distance_m", &self.total_distance_m)?;
        state.serialize_field("total_distance_km", &self.total_distance_km())?;
        state.serialize_field("total_duration_s", &self.total_duration_s)?;
        state.serialize_field("total_duration_min", &self.total_duration_min())?;
        state.serialize_field("return_to_origin", &self.return_to_origin)?;
        state.end()
    }
}

/// A destination in its final visiting position.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RankedDestination {
    /// One-based visiting position.
    pub rank: usize,
    /// Destination label.
    pub label: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// The leg arriving at this destination.
    pub leg: Leg,
}

/// Complete answer to a ranking request.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RankedItinerary {
    /// Totals for the winning order.
    pub optimal_route: OptimalRoute,
    /// Destinations in visiting order; never includes the closing leg.
    pub ranked_destinations: Vec<RankedDestination>,
}

impl RankedItinerary {
    /// Destination labels in visiting order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.ranked_destinations
            .iter()
            .map(|destination| destination.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(15_420.5, 15.421)]
    #[case(999.4, 0.999)]
    #[case(0.0, 0.0)]
    fn kilometres_round_to_three_places(#[case] meters: f64, #[case] km: f64) {
        let route = OptimalRoute {
            order: vec![0, 1, 2, 3],
            total_distance_m: meters,
            total_duration_s: 0.0,
            return_to_origin: false,
        };
        assert_eq!(route.total_distance_km(), km);
    }

    #[rstest]
    fn leg_serialises_derived_units() {
        let leg = Leg {
            from: "Origin".to_owned(),
            distance_m: 1234.5,
            duration_s: 125.0,
            geometry: None,
        };

        let value = serde_json::to_value(&leg).expect("serialise");
        assert_eq!(
            value,
            json!({
                "from": "Origin",
                "distance_m": 1234.5,
                "distance_km": 1.235,
                "duration_s": 125.0,
                "duration_min": 2.08,
                "geometry": null,
            })
        );
    }
}
