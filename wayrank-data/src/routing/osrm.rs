//! OSRM response types for the Table and Route services.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/>

use serde::Deserialize;
use wayrank_core::{PathGeometry, RouteCandidate, RouteDetail, Table};

/// OSRM Table API response.
///
/// The `code` field indicates the response status; the tables are present
/// only on success and only for the requested annotations.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoTable"` - Table computation failed
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Durations in seconds; `None` cells have no route.
    pub durations: Option<Table>,

    /// Distances in meters; `None` cells have no route.
    pub distances: Option<Table>,
}

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM (`"Ok"`, `"NoRoute"`, ...).
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Route alternatives, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// One alternative in a [`RouteResponse`].
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Length in meters.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    /// GeoJSON geometry; absent when `overview=false`.
    #[serde(default)]
    pub geometry: Option<PathGeometry>,
}

/// Whether an OSRM status code signals success.
pub fn is_ok(code: &str) -> bool {
    code == "Ok"
}

impl From<RouteResponse> for RouteDetail {
    fn from(response: RouteResponse) -> Self {
        Self {
            routes: response
                .routes
                .into_iter()
                .map(|route| RouteCandidate {
                    distance_m: route.distance,
                    duration_s: route.duration,
                    geometry: route.geometry,
                })
                .collect(),
            raw: serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_table_with_both_annotations() {
        let json = r#"{
            "code": "Ok",
            "durations": [[0.0, 120.5], [null, 0.0]],
            "distances": [[0.0, 900.0], [null, 0.0]]
        }"#;

        let response: TableResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(is_ok(&response.code));
        let durations = response.durations.expect("should have durations");
        assert_eq!(durations[0][1], Some(120.5));
        assert_eq!(durations[1][0], None);
        let distances = response.distances.expect("should have distances");
        assert_eq!(distances[0][1], Some(900.0));
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{"code": "InvalidQuery", "message": "Coordinates are invalid"}"#;

        let response: TableResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!is_ok(&response.code));
        assert_eq!(response.message.as_deref(), Some("Coordinates are invalid"));
        assert!(response.durations.is_none());
        assert!(response.distances.is_none());
    }

    #[test]
    fn route_response_keeps_geometry() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "distance": 1520.3,
                "duration": 210.0,
                "weight": 210.0,
                "geometry": {"type": "LineString", "coordinates": [[51.4, 35.7], [51.41, 35.71]]},
                "legs": []
            }],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");
        let detail = RouteDetail::from(response);

        let best = detail.best().expect("one route");
        assert_eq!(best.distance_m, 1520.3);
        let geometry = best.geometry.as_ref().expect("geometry");
        assert_eq!(geometry.line().0.len(), 2);
    }

    #[test]
    fn route_without_overview_has_no_geometry() {
        let json = r#"{"code": "Ok", "routes": [{"distance": 10.0, "duration": 2.0}]}"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.routes[0].geometry.is_none());
    }
}
