//! Map viewports and screen positions.
//!
//! A [`Region`] is a centre coordinate plus a [`Span`] in degrees, the same
//! shape a map surface uses to describe what is visible.

use geo::{BoundingRect, Coord, LineString};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extent of a region in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// North-south extent.
    pub latitude_delta: f64,
    /// East-west extent.
    pub longitude_delta: f64,
}

impl Span {
    /// Construct a span from latitude and longitude deltas.
    #[must_use]
    pub const fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta,
            longitude_delta,
        }
    }

    /// Whether both deltas are finite and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.latitude_delta, self.longitude_delta]
            .iter()
            .all(|delta| delta.is_finite() && *delta >= 0.0)
    }
}

/// A visible map area described by its centre and span.
///
/// # Examples
/// ```
/// use geo::{Coord, LineString};
/// use waymark_core::Region;
///
/// let line = LineString::from(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 1.0 }]);
/// let region = Region::bounding(&line).expect("non-empty line");
/// assert_eq!(region.center, Coord { x: 1.0, y: 0.5 });
/// assert_eq!(region.span.longitude_delta, 2.0);
/// assert_eq!(region.span.latitude_delta, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    /// Centre of the visible area.
    pub center: Coord<f64>,
    /// Extent of the visible area.
    pub span: Span,
}

impl Region {
    /// Construct a region.
    #[must_use]
    pub const fn new(center: Coord<f64>, span: Span) -> Self {
        Self { center, span }
    }

    /// Smallest region containing every point of `line`.
    ///
    /// Returns `None` for an empty line.
    #[must_use]
    pub fn bounding(line: &LineString<f64>) -> Option<Self> {
        let rect = line.bounding_rect()?;
        Some(Self {
            center: rect.center(),
            span: Span::new(rect.height(), rect.width()),
        })
    }

    /// Southern and northern edge latitudes.
    #[expect(
        clippy::float_arithmetic,
        reason = "edges are derived from the centre and half the span"
    )]
    #[must_use]
    pub fn latitude_bounds(&self) -> (f64, f64) {
        let half = self.span.latitude_delta / 2.0;
        (self.center.y - half, self.center.y + half)
    }

    /// Western and eastern edge longitudes.
    #[expect(
        clippy::float_arithmetic,
        reason = "edges are derived from the centre and half the span"
    )]
    #[must_use]
    pub fn longitude_bounds(&self) -> (f64, f64) {
        let half = self.span.longitude_delta / 2.0;
        (self.center.x - half, self.center.x + half)
    }
}

/// A point in the map surface's screen space, in points from the top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScreenPoint {
    /// Horizontal offset from the left edge.
    pub x: f64,
    /// Vertical offset from the top edge.
    pub y: f64,
}

impl ScreenPoint {
    /// Construct a screen point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn bounding_region_of_empty_line_is_none() {
        let line: LineString<f64> = LineString::new(Vec::new());
        assert!(Region::bounding(&line).is_none());
    }

    #[rstest]
    fn bounding_region_of_single_point_has_zero_span() {
        let line = LineString::from(vec![Coord { x: 3.0, y: 4.0 }]);
        let region = Region::bounding(&line).expect("single point bounds");
        assert_eq!(region.center, Coord { x: 3.0, y: 4.0 });
        assert_eq!(region.span, Span::new(0.0, 0.0));
    }

    #[rstest]
    fn bounding_region_covers_unordered_points() {
        let line = LineString::from(vec![
            Coord { x: -122.03, y: 37.95 },
            Coord { x: -122.05, y: 37.97 },
            Coord { x: -122.01, y: 37.96 },
        ]);
        let region = Region::bounding(&line).expect("bounds");
        let (south, north) = region.latitude_bounds();
        let (west, east) = region.longitude_bounds();
        assert!((south - 37.95).abs() < 1e-9);
        assert!((north - 37.97).abs() < 1e-9);
        assert!((west + 122.05).abs() < 1e-9);
        assert!((east + 122.01).abs() < 1e-9);
    }

    #[rstest]
    #[case(Span::new(0.01, 0.01), true)]
    #[case(Span::new(0.0, 0.0), true)]
    #[case(Span::new(-0.01, 0.01), false)]
    #[case(Span::new(0.01, f64::NAN), false)]
    #[case(Span::new(f64::INFINITY, 0.01), false)]
    fn span_validity(#[case] span: Span, #[case] expected: bool) {
        assert_eq!(span.is_valid(), expected);
    }
}
