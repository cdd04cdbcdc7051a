//! Route providers for directions services.
//!
//! [`HttpRouteProvider`] implements [`waymark_core::RouteProvider`] against
//! the OSRM Route API. [`StraightLineRouteProvider`] answers offline with
//! the direct line between the endpoints.
//!
//! # Architecture
//!
//! `calculate` builds the request URL synchronously and returns a future
//! owning a clone of the HTTP client, so the controller never waits on the
//! network. The future must be driven by a Tokio runtime because `reqwest`
//! relies on one for its I/O.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use waymark_core::{RequestId, RouteProvider, RouteRequest};
//! use waymark_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
//!
//! let config = HttpRouteProviderConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpRouteProvider::with_config(config)?;
//!
//! let request = RouteRequest::new(
//!     RequestId(1),
//!     Coord { x: -122.03, y: 37.95 },
//!     Coord { x: -122.0323133, y: 37.957666 },
//! );
//! let future = provider.calculate(&request);
//! // Spawn `future` on a Tokio runtime and hand the result to the controller.
//! # drop(future);
//! # Ok::<(), waymark_data::routing::ProviderBuildError>(())
//! ```

mod osrm;
mod provider;
mod straight_line;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_USER_AGENT, HttpRouteProvider, HttpRouteProviderConfig, ProviderBuildError,
};
pub use straight_line::StraightLineRouteProvider;
