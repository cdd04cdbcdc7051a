//! The screen controller mediating between position, map and routes.
//!
//! [`MapController`] owns the three capability objects and the little state
//! the screen needs: the last known position, the follow flag and the route
//! request currently in flight. Every handler runs synchronously on the
//! caller's thread; route calculation is the only asynchronous step and is
//! handed back to the host as a [`PendingRoute`].

mod config;
mod gesture;

use futures_util::future::AbortHandle;
use geo::Coord;
use thiserror::Error;

use crate::{
    AuthorizationStatus, GestureKind, LineStyle, MapSurface, PendingRoute, Pin, PinId, Position,
    PositionSource, Region, RequestId, RouteCompletion, RouteError, RouteOutcome, RouteOverlay,
    RouteProvider, RouteRequest,
    distance::{format_distance, great_circle_distance},
    route::OverlayId,
};

pub use config::{
    ConfigError, ControllerConfig, DEFAULT_FOLLOW_SPAN, DEFAULT_LONG_PRESS, OverlayPolicy,
    PinTemplate,
};
pub use gesture::{GesturePhase, LongPress};

/// Errors returned by [`MapController`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// The configuration failed validation.
    #[error("invalid controller configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// The selected pin is not on the map.
    #[error("{0} is not on the map")]
    UnknownPin(PinId),
}

#[derive(Debug)]
struct InFlightRoute {
    id: RequestId,
    pin: PinId,
    handle: AbortHandle,
}

/// Screen controller for a map with live position, pins and routes.
///
/// The controller is generic over the engine boundaries: a position feed,
/// a map surface and a directions service.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::test_support::{ManualPositionSource, StubRouteProvider};
/// use waymark_core::{
///     ControllerConfig, HeadlessMapSurface, MapController, MapSurface, Position, Region, Span,
///     Viewport,
/// };
///
/// let surface = HeadlessMapSurface::new(
///     Viewport::default(),
///     Region::new(Coord { x: -122.03, y: 37.95 }, Span::new(0.05, 0.05)),
/// );
/// let mut controller = MapController::new(
///     ManualPositionSource::granting(),
///     surface,
///     StubRouteProvider::direct(),
///     ControllerConfig::default(),
/// )?;
/// let pin = controller.start().expect("default config places a pin");
/// controller.on_positions(&[Position::from_lat_lon(37.95, -122.03)]);
///
/// let pending = controller.select_pin(pin)?.expect("position is known");
/// assert_eq!(controller.surface().distance_label(), Some("Distance: 876.22 m"));
/// assert_eq!(controller.in_flight(), Some(pending.id()));
/// # Ok::<(), waymark_core::ControllerError>(())
/// ```
#[derive(Debug)]
pub struct MapController<P, M, R>
where
    P: PositionSource,
    M: MapSurface,
    R: RouteProvider,
{
    positions: P,
    surface: M,
    routes: R,
    config: ControllerConfig,
    last_position: Option<Position>,
    following: bool,
    started: bool,
    wired: bool,
    next_pin: u64,
    next_overlay: u64,
    next_request: u64,
    in_flight: Option<InFlightRoute>,
}

impl<P, M, R> MapController<P, M, R>
where
    P: PositionSource,
    M: MapSurface,
    R: RouteProvider,
{
    /// Construct a controller after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::InvalidConfig`] when `config` fails
    /// [`ControllerConfig::validate`].
    pub fn new(
        positions: P,
        surface: M,
        routes: R,
        config: ControllerConfig,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        Ok(Self {
            positions,
            surface,
            routes,
            config,
            last_position: None,
            following: false,
            started: false,
            wired: false,
            next_pin: 1,
            next_overlay: 1,
            next_request: 1,
            in_flight: None,
        })
    }

    /// Wire up the screen.
    ///
    /// Requests location permission, starts updates, registers the pan and
    /// long-press gestures, places the startup pin and attaches the surface
    /// delegate. Returns the startup pin, if one was placed. Calling `start`
    /// while running has no effect. After [`stop`](Self::stop), `start` only
    /// resumes position updates.
    pub fn start(&mut self) -> Option<PinId> {
        if self.started {
            return None;
        }
        self.started = true;
        if self.wired {
            self.positions.start_updates();
            log::info!("map controller resumed");
            return None;
        }
        self.wired = true;
        self.positions.request_authorization();
        self.positions.start_updates();
        self.surface.register_gesture(GestureKind::Pan);
        self.surface.register_gesture(GestureKind::LongPress {
            minimum_duration: self.config.long_press_minimum,
        });
        let startup = self.config.startup_pin.clone().and_then(|template| {
            let coord = template.coord?;
            Some(self.place_pin(coord, template.title, template.subtitle))
        });
        self.surface.attach_delegate();
        log::info!("map controller started");
        startup
    }

    /// Stop updates and abandon any in-flight route.
    ///
    /// Completions arriving afterwards are treated as stale. Gestures and
    /// pins stay in place.
    pub fn stop(&mut self) {
        self.cancel_route();
        self.positions.stop_updates();
        self.started = false;
        log::info!("map controller stopped");
    }

    /// Record a permission change reported by the position source.
    ///
    /// Only logs. Denial is not an error: the last known position and the
    /// follow flag are left as they are.
    pub fn on_authorization_changed(&mut self, status: AuthorizationStatus) {
        match status {
            AuthorizationStatus::Granted => log::info!("location access granted"),
            AuthorizationStatus::Denied => {
                log::warn!("location access denied; following and distances are unavailable");
            }
            AuthorizationStatus::NotDetermined => log::debug!("location access not determined"),
        }
    }

    /// Handle a batch of position fixes.
    ///
    /// The first fix replaces the last known position. When following, the
    /// map is re-centred on it. Returns whether the region changed.
    pub fn on_positions(&mut self, batch: &[Position]) -> bool {
        let Some(&position) = batch.first() else {
            return false;
        };
        self.last_position = Some(position);
        if !self.following {
            return false;
        }
        let region = Region::new(position.coord, self.config.follow_span);
        self.surface
            .set_region(region, self.config.animate_region_changes);
        true
    }

    /// Follow the user from the next position update onwards.
    pub fn show_me(&mut self) {
        self.following = true;
    }

    /// Handle a pan gesture; starting to drag stops following.
    pub fn on_pan(&mut self, phase: GesturePhase) {
        match phase {
            GesturePhase::Began => {
                self.following = false;
                log::debug!("map drag began");
            }
            GesturePhase::Ended => log::debug!("map drag ended"),
            GesturePhase::Changed | GesturePhase::Cancelled => {}
        }
    }

    /// Drop a pin where a long press was recognised.
    ///
    /// Presses shorter than the configured minimum are ignored.
    pub fn on_long_press(&mut self, press: LongPress) -> Option<PinId> {
        if press.held < self.config.long_press_minimum {
            log::debug!(
                "ignoring press held for {:?} (minimum {:?})",
                press.held,
                self.config.long_press_minimum
            );
            return None;
        }
        let coord = self.surface.coordinate_at(press.point);
        let template = &self.config.dropped_pin;
        let (title, subtitle) = (template.title.clone(), template.subtitle.clone());
        Some(self.place_pin(coord, title, subtitle))
    }

    /// Show the distance to a pin and request a route to it.
    ///
    /// Any route still in flight is aborted. Without a known position no
    /// distance is shown and no route is requested, so `Ok(None)` is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownPin`] when `id` is not on the map.
    pub fn select_pin(&mut self, id: PinId) -> Result<Option<PendingRoute>, ControllerError> {
        let destination = self
            .surface
            .pin(id)
            .map(|pin| pin.coord)
            .ok_or(ControllerError::UnknownPin(id))?;
        log::debug!("selected {id}");
        let Some(position) = self.last_position else {
            log::debug!("no position known; skipping distance and route for {id}");
            return Ok(None);
        };

        let metres = great_circle_distance(position.coord, destination);
        self.surface.show_distance(&format_distance(metres));

        self.cancel_route();
        let request = RouteRequest::new(self.allocate_request(), position.coord, destination)
            .with_transport(self.config.transport);
        let future = self.routes.calculate(&request);
        let (pending, handle) = PendingRoute::new(request, future);
        self.in_flight = Some(InFlightRoute {
            id: request.id,
            pin: id,
            handle,
        });
        Ok(Some(pending))
    }

    /// Apply the result of a route request.
    ///
    /// Completions for anything other than the in-flight request are
    /// ignored. Failures are logged and leave the map and distance label
    /// untouched.
    pub fn complete_route(&mut self, completion: RouteCompletion) -> RouteOutcome {
        let RouteCompletion { id, result } = completion;
        let Some(in_flight) = self.in_flight.take_if(|route| route.id == id) else {
            log::debug!("discarding stale completion for {id}");
            return RouteOutcome::Stale(id);
        };

        let drawn = result.and_then(|path| {
            let region = path.bounding_region().ok_or(RouteError::EmptyRoute)?;
            Ok((path, region))
        });
        let (path, region) = match drawn {
            Ok(drawn) => drawn,
            Err(err) => {
                log::warn!("route to {} failed: {err}", in_flight.pin);
                return RouteOutcome::Failed(err);
            }
        };

        if self.config.overlay_policy == OverlayPolicy::ReplacePrevious {
            self.surface.clear_overlays();
        }
        let overlay = RouteOverlay::from_path(self.allocate_overlay(), &path);
        let overlay_id = overlay.id;
        self.surface.add_overlay(overlay);
        self.surface
            .set_region(region, self.config.animate_region_changes);
        log::debug!(
            "drew route to {} with {} points ({:.0} m)",
            in_flight.pin,
            path.len(),
            path.distance_m
        );
        RouteOutcome::Drawn {
            overlay: overlay_id,
            region,
        }
    }

    /// Abort the in-flight route request, if any.
    pub fn cancel_route(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
            log::debug!("cancelled {}", in_flight.id);
        }
    }

    /// Stroke to render `overlay` with; the same for every overlay.
    #[must_use]
    pub const fn overlay_style(&self, _overlay: &RouteOverlay) -> LineStyle {
        self.config.route_style
    }

    /// Whether the map re-centres on the next position update.
    #[must_use]
    pub const fn is_following(&self) -> bool {
        self.following
    }

    /// Most recent position, if any update has arrived.
    #[must_use]
    pub const fn last_position(&self) -> Option<Position> {
        self.last_position
    }

    /// Identity of the route request in flight.
    #[must_use]
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|route| route.id)
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The map surface.
    #[must_use]
    pub const fn surface(&self) -> &M {
        &self.surface
    }

    /// The position source.
    #[must_use]
    pub const fn position_source(&self) -> &P {
        &self.positions
    }

    /// The route provider.
    #[must_use]
    pub const fn route_provider(&self) -> &R {
        &self.routes
    }

    fn place_pin(&mut self, coord: Coord<f64>, title: String, subtitle: String) -> PinId {
        let id = PinId(self.next_pin);
        self.next_pin += 1;
        self.surface.add_pin(Pin {
            id,
            coord,
            title,
            subtitle,
        });
        log::debug!("placed {id} at {:.6}, {:.6}", coord.y, coord.x);
        id
    }

    fn allocate_overlay(&mut self) -> OverlayId {
        let id = OverlayId(self.next_overlay);
        self.next_overlay += 1;
        id
    }

    fn allocate_request(&mut self) -> RequestId {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        id
    }
}
