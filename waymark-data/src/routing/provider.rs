//! HTTP-based `RouteProvider` using OSRM's Route API.
//!
//! [`HttpRouteProvider`] asks the service for the full-resolution geometry
//! of the best route between the request's endpoints and converts it into a
//! [`RoutePath`].

use std::time::Duration;

use geo::Coord;
use reqwest::{Client, StatusCode};
use url::Url;
use waymark_core::{RouteError, RouteFuture, RoutePath, RouteProvider, RouteRequest, TransportMode};

use super::osrm::{NO_ROUTE_CODE, RouteResponse};

/// Error type for [`HttpRouteProvider`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// The base URL could not be parsed.
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl { url, source } => {
                write!(f, "invalid routing service URL {url:?}: {source}")
            }
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBaseUrl { source, .. } => Some(source),
            Self::HttpClient(err) => Some(err),
        }
    }
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "waymark-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpRouteProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRouteProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRouteProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based route provider using the OSRM Route API.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its
/// connection pool between clones.
#[derive(Debug, Clone)]
pub struct HttpRouteProvider {
    client: Client,
    config: HttpRouteProviderConfig,
}

impl HttpRouteProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid URL or the
    /// HTTP client fails to build.
    pub fn with_config(config: HttpRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        Url::parse(&config.base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpRouteProviderConfig {
        &self.config
    }

    /// Build the OSRM Route API URL for `request`.
    ///
    /// The URL format is:
    /// `{base_url}/route/v1/{profile}/{lon},{lat};{lon},{lat}?overview=full&geometries=geojson`.
    fn build_route_url(&self, request: &RouteRequest) -> String {
        let RouteRequest {
            source,
            destination,
            transport,
            ..
        } = request;
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            profile(*transport),
            source.x,
            source.y,
            destination.x,
            destination.y
        )
    }
}

/// OSRM profile name for a transport mode.
const fn profile(transport: TransportMode) -> &'static str {
    match transport {
        TransportMode::Automobile => "driving",
        TransportMode::Walking => "walking",
        TransportMode::Cycling => "cycling",
    }
}

/// Fetch and decode a route.
///
/// OSRM reports application errors such as `NoRoute` with a 4xx status and
/// a JSON body, so the body is decoded before the status is considered.
async fn fetch_route(client: Client, url: String, timeout: Duration) -> Result<RoutePath, RouteError> {
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|err| convert_reqwest_error(&err, &url, timeout))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|err| convert_reqwest_error(&err, &url, timeout))?;

    match serde_json::from_slice::<RouteResponse>(&body) {
        Ok(decoded) => convert_response(decoded),
        Err(err) if status.is_success() => Err(RouteError::ParseError {
            message: err.to_string(),
        }),
        Err(_) => Err(status_error(&url, status)),
    }
}

fn status_error(url: &str, status: StatusCode) -> RouteError {
    RouteError::HttpError {
        url: url.to_owned(),
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned(),
    }
}

/// Convert a reqwest error to a `RouteError`.
fn convert_reqwest_error(error: &reqwest::Error, url: &str, timeout: Duration) -> RouteError {
    if error.is_timeout() {
        return RouteError::Timeout {
            url: url.to_owned(),
            timeout_secs: timeout.as_secs(),
        };
    }

    if let Some(status) = error.status() {
        return RouteError::HttpError {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    RouteError::NetworkError {
        url: url.to_owned(),
        message: error.to_string(),
    }
}

/// Convert an OSRM response to the first route's [`RoutePath`].
pub(crate) fn convert_response(response: RouteResponse) -> Result<RoutePath, RouteError> {
    if !response.is_ok() {
        if response.code == NO_ROUTE_CODE {
            return Err(RouteError::NoRoute);
        }
        return Err(RouteError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response
        .routes
        .and_then(|routes| routes.into_iter().next())
        .ok_or(RouteError::NoRoute)?;

    let coords: Vec<Coord<f64>> = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[x, y]| Coord { x, y })
        .collect();
    if coords.is_empty() {
        return Err(RouteError::EmptyRoute);
    }

    // Negative, NaN or infinite durations would panic in from_secs_f64.
    let travel_time = Some(route.duration)
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map_or(Duration::ZERO, Duration::from_secs_f64);

    Ok(RoutePath::new(coords, route.distance, travel_time))
}

impl RouteProvider for HttpRouteProvider {
    fn calculate(&self, request: &RouteRequest) -> RouteFuture {
        let url = self.build_route_url(request);
        log::debug!("requesting {} from {url}", request.id);
        Box::pin(fetch_route(self.client.clone(), url, self.config.timeout))
    }
}
