use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identity of a route request issued by the controller.
///
/// Identifiers increase monotonically within a controller session, so a
/// completion carrying an older identifier is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "route#{}", self.0)
    }
}

/// Means of travel requested from the directions service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransportMode {
    /// Driving on roads.
    #[default]
    Automobile,
    /// Walking on paths and pavements.
    Walking,
    /// Cycling.
    Cycling,
}

impl TransportMode {
    /// Return the mode as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Automobile => "automobile",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for a route from `source` to `destination`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::{RequestId, RouteRequest, TransportMode};
///
/// let request = RouteRequest::new(
///     RequestId(1),
///     Coord { x: -122.03, y: 37.95 },
///     Coord { x: -122.0323133, y: 37.957666 },
/// );
/// assert_eq!(request.transport, TransportMode::Automobile);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteRequest {
    /// Identity used to match the completion to the request.
    pub id: RequestId,
    /// Start of the route.
    pub source: Coord<f64>,
    /// End of the route.
    pub destination: Coord<f64>,
    /// Means of travel.
    pub transport: TransportMode,
}

impl RouteRequest {
    /// Construct an automobile route request.
    #[must_use]
    pub fn new(id: RequestId, source: Coord<f64>, destination: Coord<f64>) -> Self {
        Self {
            id,
            source,
            destination,
            transport: TransportMode::default(),
        }
    }

    /// Override the transport mode.
    #[must_use]
    pub const fn with_transport(mut self, transport: TransportMode) -> Self {
        self.transport = transport;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TransportMode::Automobile, "automobile")]
    #[case(TransportMode::Walking, "walking")]
    #[case(TransportMode::Cycling, "cycling")]
    fn transport_mode_names(#[case] mode: TransportMode, #[case] expected: &str) {
        assert_eq!(mode.to_string(), expected);
    }

    #[rstest]
    fn with_transport_overrides_default() {
        let request = RouteRequest::new(RequestId(3), Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 })
            .with_transport(TransportMode::Walking);
        assert_eq!(request.transport, TransportMode::Walking);
        assert_eq!(request.id.to_string(), "route#3");
    }
}
