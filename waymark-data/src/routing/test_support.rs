//! Test utilities for routing providers.
//!
//! Decodes canned OSRM bodies through the same conversion the HTTP provider
//! uses, so behaviour can be checked without a running service.

use waymark_core::{RouteError, RoutePath};

use super::osrm::RouteResponse;
use super::provider::convert_response;

/// Decode an OSRM Route API body into a [`RoutePath`].
///
/// # Errors
///
/// Returns [`RouteError::ParseError`] for malformed JSON and the same
/// errors as a live request for well-formed error responses.
///
/// # Example
///
/// ```
/// use waymark_core::RouteError;
/// use waymark_data::routing::test_support::decode_route_body;
///
/// let err = decode_route_body(r#"{ "code": "NoRoute" }"#).expect_err("no route");
/// assert_eq!(err, RouteError::NoRoute);
/// ```
pub fn decode_route_body(body: &str) -> Result<RoutePath, RouteError> {
    let response: RouteResponse =
        serde_json::from_str(body).map_err(|err| RouteError::ParseError {
            message: err.to_string(),
        })?;
    convert_response(response)
}
