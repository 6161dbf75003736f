//! Candidate places returned by a geocoder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Point, PointError};

/// A geocoding candidate.
///
/// The well-known fields are typed; everything else the upstream search
/// returns (address breakdown, bounding box, importance, ...) is kept
/// verbatim in [`Place::extra`] so the record round-trips unchanged.
///
/// # Examples
/// ```
/// use wayrank_core::Place;
///
/// let place: Place = serde_json::from_str(
///     r#"{"display_name": "Tehran", "lat": "35.6892", "lon": "51.3890", "importance": 0.8}"#,
/// )
/// .unwrap();
/// let point = place.point().unwrap();
/// assert_eq!(point.label(), "Tehran");
/// assert_eq!(point.lat(), 35.6892);
/// assert!(place.extra.contains_key("importance"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Upstream identifier, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<u64>,
    /// Full human-readable name.
    #[serde(default)]
    pub display_name: String,
    /// Latitude as the decimal string the provider sent.
    pub lat: String,
    /// Longitude as the decimal string the provider sent.
    pub lon: String,
    /// Remaining provider fields, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Place {
    /// Convert the candidate into a [`Point`] labelled with its display name.
    ///
    /// # Errors
    ///
    /// Returns [`PointError`] when the provider's coordinates do not parse or
    /// fall out of range.
    pub fn point(&self) -> Result<Point, PointError> {
        let lat = parse_coordinate(&self.lat)?;
        let lon = parse_coordinate(&self.lon)?;
        Point::new(self.display_name.clone(), lat, lon)
    }
}

fn parse_coordinate(text: &str) -> Result<f64, PointError> {
    text.trim()
        .parse()
        .map_err(|_| PointError::InvalidNumber {
            input: text.to_owned(),
        })
}
