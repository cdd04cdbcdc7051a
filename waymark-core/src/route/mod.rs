//! Request driving routes between two coordinates.
//!
//! The [`RouteProvider`] trait abstracts a directions service. Calculation
//! is asynchronous: [`RouteProvider::calculate`] returns a future straight
//! away and the caller decides where to drive it. The controller wraps that
//! future in a [`PendingRoute`] keyed by [`RequestId`] so a newer request can
//! abort an older one.

mod error;
mod path;
mod pending;
mod provider;
mod request;

pub use error::RouteError;
pub use path::{OverlayId, OverlayLevel, RouteOverlay, RoutePath};
pub use pending::{PendingRoute, RouteCompletion, RouteOutcome};
pub use provider::{RouteFuture, RouteProvider};
pub use request::{RequestId, RouteRequest, TransportMode};
