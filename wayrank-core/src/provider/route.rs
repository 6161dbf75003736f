//! Point-to-point route requests and the records a route provider returns.

use geo::{BoundingRect, Coord, LineString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Overview, Point, Profile};

/// A detailed route lookup between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    /// Start position (`x = lon`, `y = lat`).
    pub origin: Coord<f64>,
    /// End position (`x = lon`, `y = lat`).
    pub destination: Coord<f64>,
    /// Routing mode.
    pub profile: Profile,
    /// Requested geometry detail.
    pub overview: Overview,
}

impl RouteQuery {
    /// Build a query between two validated points.
    #[must_use]
    pub const fn between(
        origin: &Point,
        destination: &Point,
        profile: Profile,
        overview: Overview,
    ) -> Self {
        Self {
            origin: origin.location(),
            destination: destination.location(),
            profile,
            overview,
        }
    }
}

/// Road geometry of a route, serialised as a GeoJSON `LineString`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayrank_core::PathGeometry;
///
/// let path = PathGeometry::new(vec![Coord { x: 51.0, y: 35.0 }, Coord { x: 51.1, y: 35.1 }]);
/// let json = serde_json::to_value(&path).unwrap();
/// assert_eq!(json["type"], "LineString");
/// assert_eq!(json["coordinates"][1][0], 51.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoJsonLineString", into = "GeoJsonLineString")]
pub struct PathGeometry {
    line: LineString<f64>,
}

impl PathGeometry {
    /// Wrap an ordered list of positions.
    #[must_use]
    pub fn new(coords: Vec<Coord<f64>>) -> Self {
        Self {
            line: LineString::new(coords),
        }
    }

    /// The geometry as a `geo` line string.
    #[must_use]
    pub const fn line(&self) -> &LineString<f64> {
        &self.line
    }

    /// `[min_lon, min_lat, max_lon, max_lat]`, or `None` for an empty path.
    #[must_use]
    pub fn bbox(&self) -> Option<[f64; 4]> {
        self.line.bounding_rect().map(|rect| {
            let (min, max) = (rect.min(), rect.max());
            [min.x, min.y, max.x, max.y]
        })
    }
}

#[derive(Serialize, Deserialize)]
struct GeoJsonLineString {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<[f64; 2]>,
}

impl TryFrom<GeoJsonLineString> for PathGeometry {
    type Error = String;

    fn try_from(value: GeoJsonLineString) -> Result<Self, Self::Error> {
        if value.kind != "LineString" {
            return Err(format!("expected a LineString geometry, got {}", value.kind));
        }
        Ok(Self::new(
            value
                .coordinates
                .into_iter()
                .map(|[x, y]| Coord { x, y })
                .collect(),
        ))
    }
}

impl From<PathGeometry> for GeoJsonLineString {
    fn from(value: PathGeometry) -> Self {
        Self {
            kind: "LineString".to_owned(),
            coordinates: value.line.into_inner().into_iter().map(|c| [c.x, c.y]).collect(),
        }
    }
}

/// One route alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// Length in meters.
    pub distance_m: f64,
    /// Travel time in seconds.
    pub duration_s: f64,
    /// Road geometry; absent when the query asked for no overview.
    pub geometry: Option<PathGeometry>,
}

/// All alternatives a route provider returned, best first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteDetail {
    /// Route alternatives; may be empty.
    pub routes: Vec<RouteCandidate>,
    /// Upstream response body exactly as received, including waypoints and
    /// per-leg steps; `null` when the provider has none.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub raw: Value,
}

/// Headline figures for the best route alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Length in meters.
    pub distance_m: f64,
    /// Travel time in seconds.
    pub duration_s: f64,
    /// Geometry extent as `[min_lon, min_lat, max_lon, max_lat]`.
    pub bbox: Option<[f64; 4]>,
}

impl RouteDetail {
    /// The best alternative, if any.
    #[must_use]
    pub fn best(&self) -> Option<&RouteCandidate> {
        self.routes.first()
    }

    /// Summarise the best alternative.
    ///
    /// # Examples
    /// ```
    /// use wayrank_core::{RouteCandidate, RouteDetail};
    ///
    /// let detail = RouteDetail {
    ///     routes: vec![RouteCandidate { distance_m: 1000.0, duration_s: 120.0, geometry: None }],
    ///     ..RouteDetail::default()
    /// };
    /// let summary = detail.summary().unwrap();
    /// assert_eq!(summary.distance_m, 1000.0);
    /// assert!(summary.bbox.is_none());
    /// assert!(RouteDetail::default().summary().is_none());
    /// ```
    #[must_use]
    pub fn summary(&self) -> Option<RouteSummary> {
        self.best().map(|route| RouteSummary {
            distance_m: route.distance_m,
            duration_s: route.duration_s,
            bbox: route.geometry.as_ref().and_then(PathGeometry::bbox),
        })
    }
}
