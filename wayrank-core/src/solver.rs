//! Ranking requests, their wire form and the `Ranker` seam.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CostMatrixError, Point, PointError, PointInput, Profile, ProviderError, RankedItinerary};

/// Number of destinations a ranking request must carry.
pub const DESTINATION_COUNT: usize = 4;

/// Label given to the origin when the caller supplies none.
pub const DEFAULT_ORIGIN_LABEL: &str = "Origin";

/// Label given to the destination at one-based `position` when the caller
/// supplies none.
///
/// # Examples
/// ```
/// use wayrank_core::default_destination_label;
///
/// assert_eq!(default_destination_label(2), "Destination 2");
/// ```
#[must_use]
pub fn default_destination_label(position: usize) -> String {
    format!("Destination {position}")
}

/// Parameters for a ranking request.
///
/// # Examples
/// ```rust
/// use wayrank_core::{Point, Profile, RankRequest};
///
/// let origin = Point::new("Home", 35.70, 51.40).unwrap();
/// let destinations = (1..=4)
///     .map(|i| Point::new(format!("D{i}"), 35.70 + f64::from(i) / 100.0, 51.40).unwrap())
///     .collect();
/// let request = RankRequest {
///     origin,
///     destinations,
///     profile: Profile::Car,
///     return_to_origin: false,
/// };
/// assert!(request.validate().is_ok());
/// assert_eq!(request.points().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RankRequest {
    /// Where the itinerary starts.
    pub origin: Point,
    /// Places to visit; exactly [`DESTINATION_COUNT`] are required.
    pub destinations: Vec<Point>,
    /// Routing mode.
    pub profile: Profile,
    /// Whether the itinerary closes with a leg back to the origin.
    pub return_to_origin: bool,
}

impl RankRequest {
    /// Check the destination count.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::DestinationCount`] unless exactly
    /// [`DESTINATION_COUNT`] destinations are present.
    pub fn validate(&self) -> Result<(), RankError> {
        if self.destinations.len() == DESTINATION_COUNT {
            Ok(())
        } else {
            Err(RankError::DestinationCount {
                expected: DESTINATION_COUNT,
                found: self.destinations.len(),
            })
        }
    }

    /// The origin followed by the destinations, in request order.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        std::iter::once(&self.origin)
            .chain(&self.destinations)
            .cloned()
            .collect()
    }
}

/// A ranking request as it arrives at the system boundary.
///
/// Points may be `"lat,lon"` strings or `{lat, lon, label?}` objects. Missing
/// labels default to `"Origin"` and `"Destination N"`.
///
/// # Examples
/// ```
/// use wayrank_core::{RankPayload, RankRequest};
///
/// let payload: RankPayload = serde_json::from_str(r#"{
///     "origin": "35.70,51.40",
///     "destinations": ["35.71,51.41", {"lat": 35.72, "lon": 51.42, "label": "Bazaar"},
///                      "35.73,51.43", "35.74,51.44"]
/// }"#).unwrap();
/// let request = RankRequest::try_from(payload).unwrap();
/// assert_eq!(request.origin.label(), "Origin");
/// assert_eq!(request.destinations[0].label(), "Destination 1");
/// assert_eq!(request.destinations[1].label(), "Bazaar");
/// assert!(!request.return_to_origin);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankPayload {
    /// Starting point.
    pub origin: PointInput,
    /// Places to visit.
    pub destinations: Vec<PointInput>,
    /// Routing mode; defaults to `car`.
    #[serde(default)]
    pub profile: Profile,
    /// Whether to close the loop; defaults to `false`.
    #[serde(default)]
    pub return_to_origin: bool,
}

impl TryFrom<RankPayload> for RankRequest {
    type Error = RankError;

    fn try_from(payload: RankPayload) -> Result<Self, Self::Error> {
        if payload.destinations.len() != DESTINATION_COUNT {
            return Err(RankError::DestinationCount {
                expected: DESTINATION_COUNT,
                found: payload.destinations.len(),
            });
        }
        let origin = resolve(payload.origin, DEFAULT_ORIGIN_LABEL)?;
        let destinations = payload
            .destinations
            .into_iter()
            .enumerate()
            .map(|(index, input)| resolve(input, &default_destination_label(index + 1)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            origin,
            destinations,
            profile: payload.profile,
            return_to_origin: payload.return_to_origin,
        })
    }
}

fn resolve(input: PointInput, default_label: &str) -> Result<Point, RankError> {
    input
        .into_point(default_label)
        .map_err(|source| RankError::InvalidPoint {
            label: default_label.to_owned(),
            source,
        })
}

/// Errors returned by [`Ranker::rank`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// A point failed to parse or validate.
    #[error("invalid point for {label}: {source}")]
    InvalidPoint {
        /// Label of the offending point.
        label: String,
        /// Underlying validation failure.
        #[source]
        source: PointError,
    },
    /// The request did not carry exactly [`DESTINATION_COUNT`] destinations.
    #[error("expected exactly {expected} destinations, got {found}")]
    DestinationCount {
        /// Required count.
        expected: usize,
        /// Count supplied.
        found: usize,
    },
    /// The cost matrix could not be fetched.
    #[error("matrix provider unavailable: {0}")]
    ProviderUnavailable(#[source] ProviderError),
    /// The cost matrix was fetched but is unusable.
    #[error("matrix provider returned an unusable table: {0}")]
    InvalidMatrix(#[source] CostMatrixError),
    /// Every visiting order crosses a pair with no route.
    #[error("no visiting order has a finite distance")]
    Unreachable,
}

impl RankError {
    /// Whether the failure lies with the caller's input rather than upstream.
    ///
    /// # Examples
    /// ```
    /// use wayrank_core::RankError;
    ///
    /// let err = RankError::DestinationCount { expected: 4, found: 3 };
    /// assert!(err.is_invalid_input());
    /// assert!(!RankError::Unreachable.is_invalid_input());
    /// ```
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidPoint { .. } | Self::DestinationCount { .. }
        )
    }
}

/// Rank destinations into the cheapest visiting order.
///
/// Implementations must reject a request whose destination count is wrong
/// before contacting any provider.
/// Rankers must be `Send + Sync` to operate safely across threads.
pub trait Ranker: Send + Sync {
    /// Produce the optimal itinerary for `request`.
    fn rank(&self, request: &RankRequest) -> Result<RankedItinerary, RankError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn payload(destinations: usize) -> RankPayload {
        RankPayload {
            origin: PointInput::Text("35.70,51.40".to_owned()),
            destinations: (0..destinations)
                .map(|i| PointInput::Text(format!("35.7{i},51.4{i}")))
                .collect(),
            profile: Profile::Foot,
            return_to_origin: true,
        }
    }

    #[rstest]
    fn payload_resolves_with_default_labels() {
        let request = RankRequest::try_from(payload(4)).expect("valid payload");
        assert_eq!(request.origin.label(), "Origin");
        let labels: Vec<_> = request.destinations.iter().map(Point::label).collect();
        assert_eq!(
            labels,
            ["Destination 1", "Destination 2", "Destination 3", "Destination 4"]
        );
        assert_eq!(request.profile, Profile::Foot);
        assert!(request.validate().is_ok());
    }

    #[rstest]
    #[case(3)]
    #[case(5)]
    fn wrong_count_is_rejected(#[case] count: usize) {
        let err = RankRequest::try_from(payload(count)).expect_err("wrong count");
        assert_eq!(
            err,
            RankError::DestinationCount {
                expected: 4,
                found: count
            }
        );
    }

    #[rstest]
    fn bad_destination_names_its_position() {
        let mut payload = payload(4);
        payload.destinations[2] = PointInput::Text("95,0".to_owned());
        let err = RankRequest::try_from(payload).expect_err("latitude out of range");
        assert!(matches!(
            err,
            RankError::InvalidPoint { ref label, source: PointError::LatitudeOutOfRange { .. } }
                if label == "Destination 3"
        ));
        assert!(err.is_invalid_input());
    }

    #[rstest]
    fn payload_defaults_profile_and_loop_flag() {
        let json = r#"{"origin": "0,0", "destinations": []}"#;
        let payload: RankPayload = serde_json::from_str(json).expect("deserialise");
        assert_eq!(payload.profile, Profile::Car);
        assert!(!payload.return_to_origin);
    }
}
