//! Core domain types for the Waymark map-interaction engine.
//!
//! The crate models a single map screen: a live position feed, pins dropped
//! by long press and a driving route drawn to a selected pin. Rendering,
//! positioning and route computation live behind the [`PositionSource`],
//! [`MapSurface`] and [`RouteProvider`] traits so hosts and tests can supply
//! their own implementations.
//!
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude`.

#![forbid(unsafe_code)]

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod controller;
pub mod distance;
pub mod headless;
pub mod position;
pub mod region;
pub mod route;
pub mod style;
pub mod surface;

#[doc(hidden)]
pub mod test_support;

pub use controller::{
    ConfigError, ControllerConfig, ControllerError, GesturePhase, LongPress, MapController,
    OverlayPolicy, PinTemplate,
};
pub use distance::{format_distance, great_circle_distance};
pub use headless::{HeadlessMapSurface, RegionChange, Viewport};
pub use position::{AuthorizationStatus, PositionSource};
pub use region::{Region, ScreenPoint, Span};
pub use route::{
    OverlayId, OverlayLevel, PendingRoute, RequestId, RouteCompletion, RouteError, RouteFuture,
    RouteOutcome, RouteOverlay, RoutePath, RouteProvider, RouteRequest, TransportMode,
};
pub use style::{LineStyle, Rgba};
pub use surface::{GestureKind, MapSurface};

/// A fix reported by a [`PositionSource`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::Position;
///
/// let position = Position::new(Coord { x: -122.03, y: 37.95 }).with_accuracy(5.0);
/// assert_eq!(position.latitude(), 37.95);
/// assert_eq!(position.horizontal_accuracy, Some(5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// Reported location.
    pub coord: Coord<f64>,
    /// Radius of uncertainty in metres, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub horizontal_accuracy: Option<f64>,
    /// Altitude above sea level in metres, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub altitude: Option<f64>,
}

impl Position {
    /// Construct a position without accuracy or altitude metadata.
    #[must_use]
    pub const fn new(coord: Coord<f64>) -> Self {
        Self {
            coord,
            horizontal_accuracy: None,
            altitude: None,
        }
    }

    /// Construct a position from latitude and longitude in degrees.
    #[must_use]
    pub const fn from_lat_lon(latitude: f64, longitude: f64) -> Self {
        Self::new(Coord {
            x: longitude,
            y: latitude,
        })
    }

    /// Attach a horizontal accuracy in metres.
    #[must_use]
    pub const fn with_accuracy(mut self, metres: f64) -> Self {
        self.horizontal_accuracy = Some(metres);
        self
    }

    /// Attach an altitude in metres.
    #[must_use]
    pub const fn with_altitude(mut self, metres: f64) -> Self {
        self.altitude = Some(metres);
        self
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coord.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coord.x
    }
}

/// Identifier assigned to a [`Pin`] by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PinId(pub u64);

impl std::fmt::Display for PinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pin#{}", self.0)
    }
}

/// A labelled marker placed on the map.
///
/// The coordinate is always present, so selecting a pin cannot fail for
/// lack of a location.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::{Pin, PinId};
///
/// let pin = Pin::new(PinId(1), Coord { x: -122.0323133, y: 37.957666 }, "Destination", "Here you go");
/// assert_eq!(pin.title, "Destination");
/// assert_eq!(pin.coord.y, 37.957666);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pin {
    /// Identifier unique within a controller session.
    pub id: PinId,
    /// Location of the marker.
    pub coord: Coord<f64>,
    /// Primary label.
    pub title: String,
    /// Secondary label.
    pub subtitle: String,
}

impl Pin {
    /// Construct a pin.
    pub fn new(
        id: PinId,
        coord: Coord<f64>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Self {
        Self {
            id,
            coord,
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn position_from_lat_lon_maps_axes() {
        let position = Position::from_lat_lon(37.95, -122.03);
        assert_eq!(position.coord, Coord { x: -122.03, y: 37.95 });
        assert_eq!(position.latitude(), 37.95);
        assert_eq!(position.longitude(), -122.03);
        assert!(position.horizontal_accuracy.is_none());
        assert!(position.altitude.is_none());
    }

    #[rstest]
    fn position_builders_attach_metadata() {
        let position = Position::from_lat_lon(0.0, 0.0)
            .with_accuracy(12.5)
            .with_altitude(30.0);
        assert_eq!(position.horizontal_accuracy, Some(12.5));
        assert_eq!(position.altitude, Some(30.0));
    }

    #[rstest]
    fn pin_id_displays_with_prefix() {
        assert_eq!(PinId(7).to_string(), "pin#7");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn position_deserialises_without_metadata() {
        let json = r#"{ "coord": { "x": -122.03, "y": 37.95 } }"#;
        let position: Position = serde_json::from_str(json).expect("should deserialise");
        assert_eq!(position, Position::from_lat_lon(37.95, -122.03));
    }
}
