//! Facade crate for the Waymark map-interaction engine.
//!
//! This crate re-exports the controller, domain types and capability traits
//! from `waymark-core` and exposes the HTTP routing adapters behind the
//! `routing-http` feature.

#![forbid(unsafe_code)]

pub use waymark_core::{
    AuthorizationStatus, ControllerConfig, ControllerError, GestureKind, GesturePhase,
    HeadlessMapSurface, LineStyle, LongPress, MapController, MapSurface, OverlayId, OverlayPolicy,
    PendingRoute, Pin, PinId, Position, PositionSource, Region, RequestId, RouteCompletion,
    RouteError, RouteFuture, RouteOutcome, RouteOverlay, RoutePath, RouteProvider, RouteRequest,
    ScreenPoint, Span, TransportMode, Viewport, format_distance, great_circle_distance,
};

#[cfg(feature = "routing-http")]
pub use waymark_data::routing::{
    HttpRouteProvider, HttpRouteProviderConfig, ProviderBuildError, StraightLineRouteProvider,
};
