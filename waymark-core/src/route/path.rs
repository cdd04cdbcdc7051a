use std::time::Duration;

use geo::{Coord, LineString};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Region;

/// A route returned by a directions service.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use waymark_core::RoutePath;
///
/// let path = RoutePath::new(
///     vec![Coord { x: -122.03, y: 37.95 }, Coord { x: -122.0323133, y: 37.957666 }],
///     1_020.0,
///     Duration::from_secs(95),
/// );
/// assert_eq!(path.len(), 2);
/// assert!(path.bounding_region().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutePath {
    /// Ordered coordinates along the route.
    pub line: LineString<f64>,
    /// Length of the route in metres.
    pub distance_m: f64,
    /// Expected travel time.
    pub expected_travel_time: Duration,
}

impl RoutePath {
    /// Construct a path from ordered coordinates.
    #[must_use]
    pub fn new(
        coords: Vec<Coord<f64>>,
        distance_m: f64,
        expected_travel_time: Duration,
    ) -> Self {
        Self {
            line: LineString::new(coords),
            distance_m,
            expected_travel_time,
        }
    }

    /// Number of coordinates in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.line.0.len()
    }

    /// Whether the path has no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line.0.is_empty()
    }

    /// Region that fits the whole path, or `None` when it is empty.
    #[must_use]
    pub fn bounding_region(&self) -> Option<Region> {
        Region::bounding(&self.line)
    }
}

/// Identifier assigned to a [`RouteOverlay`] by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OverlayId(pub u64);

/// Drawing layer for an overlay relative to the base map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverlayLevel {
    /// Above roads, below labels.
    #[default]
    AboveRoads,
    /// Above roads and labels.
    AboveLabels,
}

/// A polyline drawn above the map for a calculated route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteOverlay {
    /// Identifier unique within a controller session.
    pub id: OverlayId,
    /// Coordinates of the polyline.
    pub line: LineString<f64>,
    /// Drawing layer.
    pub level: OverlayLevel,
}

impl RouteOverlay {
    /// Build an overlay for `path` on the roads layer.
    #[must_use]
    pub fn from_path(id: OverlayId, path: &RoutePath) -> Self {
        Self {
            id,
            line: path.line.clone(),
            level: OverlayLevel::AboveRoads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_path_has_no_region() {
        let path = RoutePath::new(Vec::new(), 0.0, Duration::ZERO);
        assert!(path.is_empty());
        assert!(path.bounding_region().is_none());
    }

    #[rstest]
    fn overlay_copies_path_line() {
        let path = RoutePath::new(
            vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }],
            157_000.0,
            Duration::from_secs(600),
        );
        let overlay = RouteOverlay::from_path(OverlayId(4), &path);
        assert_eq!(overlay.line, path.line);
        assert_eq!(overlay.level, OverlayLevel::AboveRoads);
        assert_eq!(overlay.id, OverlayId(4));
    }
}
