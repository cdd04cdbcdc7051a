//! In-memory [`MapSurface`] for tests and headless hosts.
//!
//! [`HeadlessMapSurface`] keeps pins, overlays and the visible region in
//! plain collections and converts screen points with a Web Mercator
//! projection of the current region onto the viewport.

use std::f64::consts::FRAC_PI_4;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{GestureKind, MapSurface, Pin, PinId, Region, RouteOverlay, ScreenPoint};

/// Latitude limit of the Web Mercator projection.
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

/// Size of the map surface in screen points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl Viewport {
    /// Construct a viewport.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(390.0, 844.0)
    }
}

/// A recorded call to [`MapSurface::set_region`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionChange {
    /// Region requested.
    pub region: Region,
    /// Whether the change was animated.
    pub animated: bool,
}

/// Map surface backed by in-memory collections.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::{HeadlessMapSurface, MapSurface, Region, ScreenPoint, Span, Viewport};
///
/// let region = Region::new(Coord { x: -122.03, y: 37.95 }, Span::new(0.01, 0.01));
/// let surface = HeadlessMapSurface::new(Viewport::new(400.0, 400.0), region);
/// let centre = surface.coordinate_at(ScreenPoint::new(200.0, 200.0));
/// assert!((centre.x + 122.03).abs() < 1e-9);
/// assert!((centre.y - 37.95).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMapSurface {
    viewport: Viewport,
    region: Region,
    region_changes: Vec<RegionChange>,
    pins: Vec<Pin>,
    overlays: Vec<RouteOverlay>,
    gestures: Vec<GestureKind>,
    delegate_attached: bool,
    distance_label: Option<String>,
}

impl HeadlessMapSurface {
    /// Create an empty surface showing `region`.
    #[must_use]
    pub const fn new(viewport: Viewport, region: Region) -> Self {
        Self {
            viewport,
            region,
            region_changes: Vec::new(),
            pins: Vec::new(),
            overlays: Vec::new(),
            gestures: Vec::new(),
            delegate_attached: false,
            distance_label: None,
        }
    }

    /// Size of the surface.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Every region change in call order.
    #[must_use]
    pub fn region_changes(&self) -> &[RegionChange] {
        &self.region_changes
    }

    /// Registered gestures in call order.
    #[must_use]
    pub fn gestures(&self) -> &[GestureKind] {
        &self.gestures
    }

    /// Whether a delegate has been attached.
    #[must_use]
    pub const fn delegate_attached(&self) -> bool {
        self.delegate_attached
    }

    /// Text currently shown in the distance label.
    #[must_use]
    pub fn distance_label(&self) -> Option<&str> {
        self.distance_label.as_deref()
    }

    /// Screen point at which `coord` appears in the current region.
    #[expect(
        clippy::float_arithmetic,
        reason = "projection maps degrees to screen points"
    )]
    #[must_use]
    pub fn point_for(&self, coord: Coord<f64>) -> ScreenPoint {
        let (west, east) = self.region.longitude_bounds();
        let (south, north) = self.region.latitude_bounds();
        let x = fraction(coord.x, west, east) * self.viewport.width;
        let top = mercator_y(north);
        let bottom = mercator_y(south);
        let y = fraction(mercator_y(coord.y), top, bottom) * self.viewport.height;
        ScreenPoint::new(x, y)
    }
}

impl MapSurface for HeadlessMapSurface {
    fn add_pin(&mut self, pin: Pin) {
        self.pins.push(pin);
    }

    fn remove_pin(&mut self, id: PinId) -> Option<Pin> {
        let index = self.pins.iter().position(|pin| pin.id == id)?;
        Some(self.pins.remove(index))
    }

    fn pin(&self, id: PinId) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.id == id)
    }

    fn pins(&self) -> &[Pin] {
        &self.pins
    }

    fn add_overlay(&mut self, overlay: RouteOverlay) {
        self.overlays.push(overlay);
    }

    fn clear_overlays(&mut self) {
        self.overlays.clear();
    }

    fn overlays(&self) -> &[RouteOverlay] {
        &self.overlays
    }

    fn region(&self) -> Region {
        self.region
    }

    fn set_region(&mut self, region: Region, animated: bool) {
        self.region = region;
        self.region_changes.push(RegionChange { region, animated });
    }

    fn register_gesture(&mut self, gesture: GestureKind) {
        self.gestures.push(gesture);
    }

    fn attach_delegate(&mut self) {
        self.delegate_attached = true;
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "projection maps screen points to degrees"
    )]
    fn coordinate_at(&self, point: ScreenPoint) -> Coord<f64> {
        if self.viewport.is_degenerate() {
            return self.region.center;
        }
        let (west, east) = self.region.longitude_bounds();
        let (south, north) = self.region.latitude_bounds();
        let x = west + (point.x / self.viewport.width) * (east - west);
        let top = mercator_y(north);
        let bottom = mercator_y(south);
        let y = top + (point.y / self.viewport.height) * (bottom - top);
        Coord {
            x,
            y: inverse_mercator_y(y),
        }
    }

    fn show_distance(&mut self, text: &str) {
        self.distance_label = Some(text.to_owned());
    }
}

#[expect(clippy::float_arithmetic, reason = "linear interpolation")]
fn fraction(value: f64, start: f64, end: f64) -> f64 {
    let extent = end - start;
    if extent == 0.0 {
        0.5
    } else {
        (value - start) / extent
    }
}

#[expect(clippy::float_arithmetic, reason = "Web Mercator projection")]
fn mercator_y(latitude: f64) -> f64 {
    let clamped = latitude.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
    (FRAC_PI_4 + clamped.to_radians() / 2.0).tan().ln()
}

#[expect(clippy::float_arithmetic, reason = "inverse Web Mercator projection")]
fn inverse_mercator_y(y: f64) -> f64 {
    (2.0 * y.exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OverlayId, OverlayLevel, Span};
    use geo::LineString;
    use rstest::{fixture, rstest};

    #[fixture]
    fn surface() -> HeadlessMapSurface {
        let region = Region::new(Coord { x: -122.03, y: 37.95 }, Span::new(0.02, 0.04));
        HeadlessMapSurface::new(Viewport::new(400.0, 800.0), region)
    }

    #[rstest]
    fn corners_map_to_region_edges(surface: HeadlessMapSurface) {
        let top_left = surface.coordinate_at(ScreenPoint::new(0.0, 0.0));
        let bottom_right = surface.coordinate_at(ScreenPoint::new(400.0, 800.0));
        assert!((top_left.x + 122.05).abs() < 1e-9);
        assert!((top_left.y - 37.96).abs() < 1e-9);
        assert!((bottom_right.x + 122.01).abs() < 1e-9);
        assert!((bottom_right.y - 37.94).abs() < 1e-9);
    }

    #[rstest]
    fn point_for_inverts_coordinate_at(surface: HeadlessMapSurface) {
        let point = ScreenPoint::new(123.0, 456.0);
        let coord = surface.coordinate_at(point);
        let back = surface.point_for(coord);
        assert!((back.x - point.x).abs() < 1e-6);
        assert!((back.y - point.y).abs() < 1e-6);
    }

    #[rstest]
    fn degenerate_viewport_returns_centre() {
        let region = Region::new(Coord { x: 1.0, y: 2.0 }, Span::new(1.0, 1.0));
        let surface = HeadlessMapSurface::new(Viewport::new(0.0, 100.0), region);
        assert_eq!(surface.coordinate_at(ScreenPoint::new(10.0, 10.0)), region.center);
    }

    #[rstest]
    fn set_region_records_changes(mut surface: HeadlessMapSurface) {
        let target = Region::new(Coord { x: 0.0, y: 0.0 }, Span::new(1.0, 1.0));
        surface.set_region(target, true);
        assert_eq!(surface.region(), target);
        assert_eq!(
            surface.region_changes(),
            &[RegionChange {
                region: target,
                animated: true
            }]
        );
    }

    #[rstest]
    fn pins_and_overlays_are_kept_in_order(mut surface: HeadlessMapSurface) {
        surface.add_pin(Pin::new(PinId(1), Coord { x: 0.0, y: 0.0 }, "a", "b"));
        surface.add_pin(Pin::new(PinId(2), Coord { x: 1.0, y: 1.0 }, "c", "d"));
        assert_eq!(surface.pins().len(), 2);
        assert_eq!(surface.pin(PinId(2)).map(|pin| pin.title.as_str()), Some("c"));

        let removed = surface.remove_pin(PinId(1)).expect("pin 1 present");
        assert_eq!(removed.id, PinId(1));
        assert!(surface.remove_pin(PinId(1)).is_none());

        surface.add_overlay(RouteOverlay {
            id: OverlayId(1),
            line: LineString::from(vec![Coord { x: 0.0, y: 0.0 }]),
            level: OverlayLevel::AboveRoads,
        });
        assert_eq!(surface.overlays().len(), 1);
        surface.clear_overlays();
        assert!(surface.overlays().is_empty());
    }

    #[rstest]
    fn distance_label_starts_empty(mut surface: HeadlessMapSurface) {
        assert!(surface.distance_label().is_none());
        surface.show_distance("Distance: 1.00 m");
        assert_eq!(surface.distance_label(), Some("Distance: 1.00 m"));
    }
}
