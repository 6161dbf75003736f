//! Labelled WGS84 positions and their boundary encoding.

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A labelled location.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. A `Point`
/// is validated on construction and cannot be mutated afterwards.
///
/// # Examples
/// ```
/// use wayrank_core::Point;
///
/// # fn main() -> Result<(), wayrank_core::PointError> {
/// let point = Point::new("Museum", 51.5, -0.1)?;
/// assert_eq!(point.label(), "Museum");
/// assert_eq!(point.lat(), 51.5);
/// assert_eq!(point.lon(), -0.1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    label: String,
    location: Coord<f64>,
}

/// Errors raised while building a [`Point`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointError {
    /// The text did not contain exactly two comma-separated parts.
    #[error("expected 'lat,lon', got {input:?}")]
    Malformed { input: String },
    /// One of the parts was not a decimal number.
    #[error("coordinate {input:?} is not a number")]
    InvalidNumber { input: String },
    /// A coordinate was NaN or infinite.
    #[error("coordinates must be finite")]
    NonFinite,
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {lat} is outside [-90, 90]")]
    LatitudeOutOfRange { lat: f64 },
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {lon} is outside [-180, 180]")]
    LongitudeOutOfRange { lon: f64 },
}

impl Point {
    /// Validate and construct a point.
    ///
    /// # Errors
    ///
    /// Returns [`PointError`] when either coordinate is non-finite or out of
    /// range.
    pub fn new(label: impl Into<String>, lat: f64, lon: f64) -> Result<Self, PointError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(PointError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(PointError::LatitudeOutOfRange { lat });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(PointError::LongitudeOutOfRange { lon });
        }
        Ok(Self {
            label: label.into(),
            location: Coord { x: lon, y: lat },
        })
    }

    /// Parse a `"lat,lon"` string.
    ///
    /// Whitespace around either part is ignored.
    ///
    /// # Examples
    /// ```
    /// use wayrank_core::Point;
    ///
    /// let point = Point::parse_lat_lon("Origin", " 35.6892 , 51.389 ").unwrap();
    /// assert_eq!(point.lat(), 35.6892);
    /// assert_eq!(point.lon(), 51.389);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PointError::Malformed`] unless the text holds exactly two
    /// parts, [`PointError::InvalidNumber`] when a part does not parse, and
    /// the range errors of [`Point::new`].
    pub fn parse_lat_lon(label: impl Into<String>, text: &str) -> Result<Self, PointError> {
        let mut parts = text.split(',').map(str::trim);
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(PointError::Malformed {
                input: text.to_owned(),
            });
        };
        Self::new(label, parse_part(lat)?, parse_part(lon)?)
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.location.x
    }

    /// Position as a `geo` coordinate (`x = lon`, `y = lat`).
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }
}

fn parse_part(part: &str) -> Result<f64, PointError> {
    part.parse::<f64>()
        .map_err(|_| PointError::InvalidNumber {
            input: part.to_owned(),
        })
}

/// A point as it arrives at the system boundary.
///
/// Callers may send either a `"lat,lon"` string or a structured object with an
/// optional label. The union is resolved once into a [`Point`] and never
/// travels further.
///
/// # Examples
/// ```
/// use wayrank_core::PointInput;
///
/// let text: PointInput = serde_json::from_str(r#""51.5,-0.1""#).unwrap();
/// let object: PointInput =
///     serde_json::from_str(r#"{"lat": 51.5, "lon": -0.1, "label": "Home"}"#).unwrap();
///
/// assert_eq!(text.into_point("Origin").unwrap().label(), "Origin");
/// assert_eq!(object.into_point("Origin").unwrap().label(), "Home");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointInput {
    /// A `"lat,lon"` string.
    Text(String),
    /// A structured coordinate pair.
    Structured {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
        /// Optional label; a default is supplied when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl PointInput {
    /// Resolve into a validated [`Point`], using `default_label` when the
    /// input carries none.
    ///
    /// # Errors
    ///
    /// Propagates [`PointError`] from parsing and range validation.
    pub fn into_point(self, default_label: &str) -> Result<Point, PointError> {
        match self {
            Self::Text(text) => Point::parse_lat_lon(default_label, &text),
            Self::Structured { lat, lon, label } => {
                Point::new(label.unwrap_or_else(|| default_label.to_owned()), lat, lon)
            }
        }
    }
}

impl From<&Point> for PointInput {
    fn from(point: &Point) -> Self {
        Self::Structured {
            lat: point.lat(),
            lon: point.lon(),
            label: Some(point.label().to_owned()),
        }
    }
}
