//! Offline provider drawing the direct line between two points.

use std::time::Duration;

use waymark_core::{
    RouteFuture, RoutePath, RouteProvider, RouteRequest, TransportMode, great_circle_distance,
};

/// Walking pace in metres per second.
const WALKING_SPEED: f64 = 1.4;
/// Cycling pace in metres per second.
const CYCLING_SPEED: f64 = 4.2;
/// Urban driving pace in metres per second.
const DRIVING_SPEED: f64 = 13.9;

/// `RouteProvider` that never leaves the process.
///
/// Each route is the two-point line from source to destination, with the
/// great-circle length and a travel time at a nominal speed for the
/// requested transport mode. Useful when no routing service is reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineRouteProvider;

impl StraightLineRouteProvider {
    /// Compute the path for `request` synchronously.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "travel time is distance over nominal speed"
    )]
    pub fn path_for(request: &RouteRequest) -> RoutePath {
        let distance = great_circle_distance(request.source, request.destination);
        let speed = match request.transport {
            TransportMode::Automobile => DRIVING_SPEED,
            TransportMode::Walking => WALKING_SPEED,
            TransportMode::Cycling => CYCLING_SPEED,
        };
        RoutePath::new(
            vec![request.source, request.destination],
            distance,
            Duration::from_secs_f64(distance / speed),
        )
    }
}

impl RouteProvider for StraightLineRouteProvider {
    fn calculate(&self, request: &RouteRequest) -> RouteFuture {
        let path = Self::path_for(request);
        log::debug!("straight-line route for {} ({:.0} m)", request.id, path.distance_m);
        Box::pin(async move { Ok(path) })
    }
}
