//! Session scripts consumed by `replay` and the report it produces.
//!
//! A script describes one screen session: the viewport, how the permission
//! prompt is answered, the controller configuration and an ordered list of
//! events. Every field except `events` has a default.
//!
//! ```json
//! {
//!   "viewport": { "width": 390.0, "height": 844.0 },
//!   "authorization": "granted",
//!   "events": [
//!     { "type": "positions", "positions": [{ "latitude": 37.95, "longitude": -122.03 }] },
//!     { "type": "show_me" },
//!     { "type": "long_press", "point": { "x": 120.0, "y": 300.0 }, "held_ms": 2000 },
//!     { "type": "select_pin", "pin": 1 },
//!     { "type": "await_routes" }
//!   ]
//! }
//! ```

use geo::Coord;
use serde::{Deserialize, Serialize};
use waymark_core::{
    AuthorizationStatus, ControllerConfig, GesturePhase, LineStyle, OverlayId, Pin, PinId,
    Position, Region, RequestId, RouteOutcome, ScreenPoint, Span, Viewport,
};

/// Span of the region shown before any event arrives.
const INITIAL_SPAN: Span = Span::new(0.05, 0.05);

/// One scripted screen session.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct SessionScript {
    /// Size of the headless map.
    #[serde(default)]
    pub(crate) viewport: Viewport,
    /// Region visible at startup; defaults to the startup pin.
    #[serde(default)]
    pub(crate) initial_region: Option<Region>,
    /// Answer given to the location permission prompt.
    #[serde(default = "granted")]
    pub(crate) authorization: AuthorizationStatus,
    /// Controller configuration.
    #[serde(default)]
    pub(crate) config: ControllerConfig,
    /// Events replayed in order.
    #[serde(default)]
    pub(crate) events: Vec<ScriptEvent>,
}

const fn granted() -> AuthorizationStatus {
    AuthorizationStatus::Granted
}

impl SessionScript {
    /// Region the map shows before the first event.
    pub(crate) fn starting_region(&self) -> Region {
        self.initial_region.unwrap_or_else(|| {
            let center = self
                .config
                .startup_pin
                .as_ref()
                .and_then(|pin| pin.coord)
                .unwrap_or(Coord { x: 0.0, y: 0.0 });
            Region::new(center, INITIAL_SPAN)
        })
    }
}

/// A position fix written as latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub(crate) struct ScriptPosition {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    #[serde(default)]
    pub(crate) accuracy: Option<f64>,
}

impl From<ScriptPosition> for Position {
    fn from(value: ScriptPosition) -> Self {
        let position = Self::from_lat_lon(value.latitude, value.longitude);
        match value.accuracy {
            Some(metres) => position.with_accuracy(metres),
            None => position,
        }
    }
}

/// A host event delivered to the controller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ScriptEvent {
    /// A batch of position fixes.
    Positions { positions: Vec<ScriptPosition> },
    /// The "show me" control was tapped.
    ShowMe,
    /// A pan gesture changed phase.
    Pan { phase: GesturePhase },
    /// A press-and-hold on the map.
    LongPress {
        point: ScreenPoint,
        #[serde(default = "default_hold_ms")]
        held_ms: u64,
    },
    /// A pin was tapped.
    SelectPin { pin: PinId },
    /// Wait for every outstanding route request to finish.
    AwaitRoutes,
}

const fn default_hold_ms() -> u64 {
    2_000
}

/// Final state of the replayed screen.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct ReplayReport {
    pub(crate) pins: Vec<Pin>,
    pub(crate) overlays: Vec<OverlayReport>,
    pub(crate) region: Region,
    pub(crate) distance_label: Option<String>,
    pub(crate) following: bool,
    pub(crate) routes: Vec<RouteReport>,
}

/// A drawn route overlay and its stroke.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct OverlayReport {
    pub(crate) id: OverlayId,
    pub(crate) points: usize,
    pub(crate) color: String,
    pub(crate) width: f64,
}

impl OverlayReport {
    pub(crate) fn new(id: OverlayId, points: usize, style: LineStyle) -> Self {
        Self {
            id,
            points,
            color: style.color.to_hex(),
            width: style.width,
        }
    }
}

/// How a route request ended.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub(crate) enum RouteReport {
    /// The route was drawn.
    Drawn { request: RequestId, overlay: OverlayId },
    /// The request failed; the map was left unchanged.
    Failed { request: RequestId, error: String },
    /// A newer selection superseded the request.
    Stale { request: RequestId },
}

impl RouteReport {
    pub(crate) fn from_outcome(request: RequestId, outcome: &RouteOutcome) -> Self {
        match outcome {
            RouteOutcome::Drawn { overlay, .. } => Self::Drawn {
                request,
                overlay: *overlay,
            },
            RouteOutcome::Failed(err) => Self::Failed {
                request,
                error: err.to_string(),
            },
            RouteOutcome::Stale(_) => Self::Stale { request },
        }
    }
}
