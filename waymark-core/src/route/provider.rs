//! Route provider trait and the boxed future it returns.

use std::future::Future;
use std::pin::Pin;

use super::error::RouteError;
use super::path::RoutePath;
use super::request::RouteRequest;

/// Future resolving to the outcome of a route calculation.
pub type RouteFuture = Pin<Box<dyn Future<Output = Result<RoutePath, RouteError>> + Send + 'static>>;

/// Calculate routes between two coordinates.
///
/// `calculate` must return without blocking; the returned future performs
/// the work. Implementations should report at least one coordinate on
/// success and return [`RouteError::NoRoute`] when no route exists.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use waymark_core::{RouteError, RouteFuture, RoutePath, RouteProvider, RouteRequest};
///
/// struct Direct;
///
/// impl RouteProvider for Direct {
///     fn calculate(&self, request: &RouteRequest) -> RouteFuture {
///         let path = RoutePath::new(
///             vec![request.source, request.destination],
///             0.0,
///             Duration::ZERO,
///         );
///         Box::pin(async move { Ok::<_, RouteError>(path) })
///     }
/// }
/// ```
pub trait RouteProvider {
    /// Start calculating a route for `request`.
    fn calculate(&self, request: &RouteRequest) -> RouteFuture;
}

impl<T: RouteProvider + ?Sized> RouteProvider for Box<T> {
    fn calculate(&self, request: &RouteRequest) -> RouteFuture {
        (**self).calculate(request)
    }
}
