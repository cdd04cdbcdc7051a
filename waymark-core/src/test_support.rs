//! Deterministic test doubles for the controller's capability traits.
//!
//! [`ManualPositionSource`] records permission and streaming calls and
//! [`StubRouteProvider`] answers every request with a configured result
//! without touching the network.

use std::cell::RefCell;
use std::time::Duration;

use crate::{
    AuthorizationStatus, PositionSource, RouteError, RouteFuture, RoutePath, RouteProvider,
    RouteRequest, great_circle_distance,
};

/// `PositionSource` whose permission prompt is answered in advance.
#[derive(Debug, Clone, Default)]
pub struct ManualPositionSource {
    answer: AuthorizationStatus,
    status: AuthorizationStatus,
    updating: bool,
    authorization_requests: usize,
}

impl ManualPositionSource {
    /// A source whose prompt will be answered with `answer`.
    #[must_use]
    pub fn answering(answer: AuthorizationStatus) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    /// A source whose prompt will be granted.
    #[must_use]
    pub fn granting() -> Self {
        Self::answering(AuthorizationStatus::Granted)
    }

    /// A source whose prompt will be denied.
    #[must_use]
    pub fn denying() -> Self {
        Self::answering(AuthorizationStatus::Denied)
    }

    /// Number of times permission was requested.
    #[must_use]
    pub const fn authorization_requests(&self) -> usize {
        self.authorization_requests
    }
}

impl PositionSource for ManualPositionSource {
    fn request_authorization(&mut self) {
        self.authorization_requests += 1;
        self.status = self.answer;
    }

    fn start_updates(&mut self) {
        self.updating = true;
    }

    fn stop_updates(&mut self) {
        self.updating = false;
    }

    fn authorization(&self) -> AuthorizationStatus {
        self.status
    }

    fn is_updating(&self) -> bool {
        self.updating
    }
}

#[derive(Debug, Clone)]
enum StubResponse {
    Direct,
    Path(RoutePath),
    Error(RouteError),
}

/// `RouteProvider` returning a pre-configured result for every request.
///
/// Returned futures are ready on their first poll. Every request is
/// recorded so tests can inspect what the controller asked for.
///
/// # Example
///
/// ```
/// use futures_util::FutureExt;
/// use geo::Coord;
/// use waymark_core::test_support::StubRouteProvider;
/// use waymark_core::{RequestId, RouteProvider, RouteRequest};
///
/// let provider = StubRouteProvider::direct();
/// let request = RouteRequest::new(RequestId(1), Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 });
/// let path = provider
///     .calculate(&request)
///     .now_or_never()
///     .expect("stub futures are ready")
///     .expect("direct routes succeed");
/// assert_eq!(path.len(), 2);
/// assert_eq!(provider.requests(), vec![request]);
/// ```
#[derive(Debug, Clone)]
pub struct StubRouteProvider {
    response: StubResponse,
    requests: RefCell<Vec<RouteRequest>>,
}

impl StubRouteProvider {
    fn with_response(response: StubResponse) -> Self {
        Self {
            response,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// A provider answering with a straight two-point path.
    #[must_use]
    pub fn direct() -> Self {
        Self::with_response(StubResponse::Direct)
    }

    /// A provider answering every request with `path`.
    #[must_use]
    pub fn with_path(path: RoutePath) -> Self {
        Self::with_response(StubResponse::Path(path))
    }

    /// A provider failing every request with `error`.
    #[must_use]
    pub fn with_error(error: RouteError) -> Self {
        Self::with_response(StubResponse::Error(error))
    }

    /// Requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.borrow().clone()
    }
}

impl RouteProvider for StubRouteProvider {
    fn calculate(&self, request: &RouteRequest) -> RouteFuture {
        self.requests.borrow_mut().push(*request);
        let result = match &self.response {
            StubResponse::Direct => Ok(RoutePath::new(
                vec![request.source, request.destination],
                great_circle_distance(request.source, request.destination),
                Duration::ZERO,
            )),
            StubResponse::Path(path) => Ok(path.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        };
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestId;
    use futures_util::FutureExt;
    use geo::Coord;
    use rstest::rstest;

    fn request() -> RouteRequest {
        RouteRequest::new(
            RequestId(1),
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 1.0 },
        )
    }

    #[rstest]
    fn granting_source_grants_after_request() {
        let mut source = ManualPositionSource::granting();
        assert_eq!(source.authorization(), AuthorizationStatus::NotDetermined);
        source.request_authorization();
        assert_eq!(source.authorization(), AuthorizationStatus::Granted);
        assert_eq!(source.authorization_requests(), 1);
    }

    #[rstest]
    fn stop_updates_clears_streaming() {
        let mut source = ManualPositionSource::denying();
        source.start_updates();
        assert!(source.is_updating());
        source.stop_updates();
        assert!(!source.is_updating());
    }

    #[rstest]
    fn with_error_returns_configured_error() {
        let provider = StubRouteProvider::with_error(RouteError::NoRoute);
        let result = provider
            .calculate(&request())
            .now_or_never()
            .expect("stub futures are ready");
        assert_eq!(result, Err(RouteError::NoRoute));
        assert_eq!(provider.requests().len(), 1);
    }

    #[rstest]
    fn with_path_ignores_request_endpoints() {
        let path = RoutePath::new(
            vec![Coord { x: 5.0, y: 5.0 }, Coord { x: 6.0, y: 6.0 }, Coord { x: 7.0, y: 7.0 }],
            10.0,
            Duration::from_secs(1),
        );
        let provider = StubRouteProvider::with_path(path.clone());
        let result = provider
            .calculate(&request())
            .now_or_never()
            .expect("stub futures are ready");
        assert_eq!(result, Ok(path));
    }
}
