use thiserror::Error;

/// Errors from [`crate::route::RouteProvider::calculate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The service answered with a route that has no coordinates.
    #[error("route contains no coordinates")]
    EmptyRoute,
    /// The service found no route between the endpoints.
    #[error("no route found between the requested coordinates")]
    NoRoute,
    /// The request could not reach the service.
    #[error("network error requesting {url}: {message}")]
    NetworkError {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service reported an application-level error.
    #[error("routing service error {code}: {message}")]
    ServiceError {
        /// Service status code.
        code: String,
        /// Service error message.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
    /// The request was aborted before it completed.
    #[error("route request was cancelled")]
    Cancelled,
}
