//! The map surface a controller draws on.

use std::time::Duration;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Pin, PinId, Region, RouteOverlay, ScreenPoint};

/// Gestures the controller asks the surface to recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GestureKind {
    /// One-finger drag of the map.
    Pan,
    /// Press and hold for at least `minimum_duration`.
    LongPress {
        /// Hold time before the press is recognised.
        minimum_duration: Duration,
    },
}

/// A pannable, zoomable map holding pins and route overlays.
///
/// Gesture callbacks flow the other way: the host reports pans, long
/// presses and pin selections to the controller.
pub trait MapSurface {
    /// Add a pin to the annotation collection.
    fn add_pin(&mut self, pin: Pin);

    /// Remove a pin, returning it when present.
    fn remove_pin(&mut self, id: PinId) -> Option<Pin>;

    /// Look up a pin by identifier.
    fn pin(&self, id: PinId) -> Option<&Pin>;

    /// All pins in insertion order.
    fn pins(&self) -> &[Pin];

    /// Add a route overlay.
    fn add_overlay(&mut self, overlay: RouteOverlay);

    /// Remove every route overlay.
    fn clear_overlays(&mut self);

    /// All overlays in insertion order.
    fn overlays(&self) -> &[RouteOverlay];

    /// Currently visible region.
    fn region(&self) -> Region;

    /// Move the visible region, optionally animating the transition.
    fn set_region(&mut self, region: Region, animated: bool);

    /// Start recognising `gesture` on the surface.
    fn register_gesture(&mut self, gesture: GestureKind);

    /// Route selection and overlay style callbacks to the controller.
    fn attach_delegate(&mut self);

    /// Convert a screen point to a map coordinate.
    fn coordinate_at(&self, point: ScreenPoint) -> Coord<f64>;

    /// Show `text` in the distance label.
    fn show_distance(&mut self, text: &str);
}
