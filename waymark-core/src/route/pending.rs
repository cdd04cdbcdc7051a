//! In-flight route requests and their completions.

use futures_util::future::{AbortHandle, Abortable, Aborted};

use crate::Region;

use super::error::RouteError;
use super::path::{OverlayId, RoutePath};
use super::provider::RouteFuture;
use super::request::{RequestId, RouteRequest};

/// A route calculation that has been issued but not yet delivered.
///
/// The host drives [`PendingRoute::resolve`] on whatever executor it owns
/// and hands the resulting [`RouteCompletion`] back to the controller.
/// Aborting the request, either explicitly or by selecting another pin,
/// makes `resolve` finish with [`RouteError::Cancelled`].
pub struct PendingRoute {
    request: RouteRequest,
    task: Abortable<RouteFuture>,
}

impl std::fmt::Debug for PendingRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRoute")
            .field("request", &self.request)
            .field("aborted", &self.task.is_aborted())
            .finish()
    }
}

impl PendingRoute {
    /// Wrap `future` so it can be aborted through the returned handle.
    pub(crate) fn new(request: RouteRequest, future: RouteFuture) -> (Self, AbortHandle) {
        let (handle, registration) = AbortHandle::new_pair();
        let pending = Self {
            request,
            task: Abortable::new(future, registration),
        };
        (pending, handle)
    }

    /// Identity of the request.
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.request.id
    }

    /// The request being calculated.
    #[must_use]
    pub const fn request(&self) -> &RouteRequest {
        &self.request
    }

    /// Whether the request has been aborted.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.task.is_aborted()
    }

    /// Drive the calculation to completion.
    pub async fn resolve(self) -> RouteCompletion {
        let id = self.request.id;
        let result = self
            .task
            .await
            .unwrap_or_else(|Aborted| Err(RouteError::Cancelled));
        RouteCompletion { id, result }
    }
}

/// The result of a route request, tagged with the request identity.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCompletion {
    /// Identity of the originating request.
    pub id: RequestId,
    /// Calculated route or the reason it failed.
    pub result: Result<RoutePath, RouteError>,
}

/// What the controller did with a [`RouteCompletion`].
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// The route was drawn and the map zoomed to fit it.
    Drawn {
        /// Overlay added for the route.
        overlay: OverlayId,
        /// Region the map was moved to.
        region: Region,
    },
    /// The request failed; nothing was drawn.
    Failed(RouteError),
    /// The completion belonged to a superseded or cancelled request.
    Stale(RequestId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use geo::Coord;
    use rstest::{fixture, rstest};
    use std::time::Duration;

    #[fixture]
    fn request() -> RouteRequest {
        RouteRequest::new(
            RequestId(9),
            Coord { x: -122.03, y: 37.95 },
            Coord { x: -122.0323133, y: 37.957666 },
        )
    }

    fn ready(result: Result<RoutePath, RouteError>) -> RouteFuture {
        Box::pin(async move { result })
    }

    #[rstest]
    fn resolves_with_provider_result(request: RouteRequest) {
        let path = RoutePath::new(
            vec![request.source, request.destination],
            900.0,
            Duration::from_secs(120),
        );
        let (pending, _handle) = PendingRoute::new(request, ready(Ok(path.clone())));
        assert_eq!(pending.id(), RequestId(9));

        let completion = pending
            .resolve()
            .now_or_never()
            .expect("ready future should resolve on first poll");

        assert_eq!(completion.id, RequestId(9));
        assert_eq!(completion.result, Ok(path));
    }

    #[rstest]
    fn aborted_request_resolves_as_cancelled(request: RouteRequest) {
        let (pending, handle) = PendingRoute::new(request, ready(Err(RouteError::NoRoute)));
        handle.abort();
        assert!(pending.is_cancelled());

        let completion = pending
            .resolve()
            .now_or_never()
            .expect("aborted future should resolve on first poll");

        assert_eq!(completion.result, Err(RouteError::Cancelled));
    }
}
