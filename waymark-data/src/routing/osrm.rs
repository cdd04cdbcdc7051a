//! OSRM API response types for the Route service.
//!
//! Requests ask for `geometries=geojson`, so each route's geometry arrives
//! as a GeoJSON `LineString` of `[longitude, latitude]` pairs.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// Status code OSRM reports for a successful request.
const OK_CODE: &str = "Ok";

/// Status code OSRM reports when the endpoints are not connected.
pub const NO_ROUTE_CODE: &str = "NoRoute";

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route between the coordinates
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoSegment"` - A coordinate could not be snapped to the network
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    pub routes: Option<Vec<OsrmRoute>>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == OK_CODE
    }
}

/// A single route in a [`RouteResponse`].
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Full-resolution route geometry.
    pub geometry: Geometry,
    /// Route length in metres.
    pub distance: f64,
    /// Expected travel time in seconds.
    pub duration: f64,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// Vertices as `[longitude, latitude]`.
    pub coordinates: Vec<[f64; 2]>,
}
