//! Straight-line distance between coordinates.

use geo::{Coord, Distance, Haversine, Point};

/// Great-circle distance in metres between two coordinates.
///
/// Uses the haversine formula on a sphere with the mean earth radius of
/// 6 371 008.8 m, so the distance label depends on that radius.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::great_circle_distance;
///
/// let pin = Coord { x: -122.0323133, y: 37.957666 };
/// let user = Coord { x: -122.03, y: 37.95 };
/// let metres = great_circle_distance(user, pin);
/// assert!((metres - 876.22).abs() < 0.01);
/// ```
#[must_use]
pub fn great_circle_distance(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to))
}

/// Render a distance for the map's distance label.
///
/// # Examples
/// ```
/// use waymark_core::format_distance;
///
/// assert_eq!(format_distance(876.2195), "Distance: 876.22 m");
/// ```
#[must_use]
pub fn format_distance(metres: f64) -> String {
    format!("Distance: {metres:.2} m")
}
