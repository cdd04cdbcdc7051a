//! Tunable constants for [`MapController`](super::MapController).

use std::time::Duration;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{LineStyle, Span, TransportMode};

/// Default hold time before a long press drops a pin.
pub const DEFAULT_LONG_PRESS: Duration = Duration::from_secs(2);

/// Default zoom used when following the user.
pub const DEFAULT_FOLLOW_SPAN: Span = Span::new(0.01, 0.01);

/// Title and subtitle given to a new pin, plus an optional fixed location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinTemplate {
    /// Location used for pins placed at startup.
    #[cfg_attr(feature = "serde", serde(default))]
    pub coord: Option<Coord<f64>>,
    /// Primary label.
    pub title: String,
    /// Secondary label.
    pub subtitle: String,
}

impl PinTemplate {
    /// Template for pins placed at a touch location.
    pub fn labelled(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            coord: None,
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    /// Fix the template to `coord`.
    #[must_use]
    pub fn at(mut self, coord: Coord<f64>) -> Self {
        self.coord = Some(coord);
        self
    }
}

/// What happens to earlier route overlays when a new route is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverlayPolicy {
    /// Remove earlier overlays so only the latest route is shown.
    #[default]
    ReplacePrevious,
    /// Keep every overlay drawn during the session.
    Accumulate,
}

/// Errors returned by [`ControllerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The follow span is negative, zero or not finite.
    #[error("follow span must be finite and positive")]
    InvalidFollowSpan,
    /// The route line width is not a positive finite number.
    #[error("route line width must be finite and positive")]
    InvalidLineWidth,
    /// The long-press hold time is zero.
    #[error("long-press duration must be positive")]
    ZeroLongPress,
    /// The startup pin lies outside valid latitude/longitude ranges.
    #[error("startup pin coordinate is outside the valid range")]
    StartupPinOutOfRange,
}

/// Inline constants governing a [`MapController`](super::MapController).
///
/// The defaults place a demonstration pin at 37.957666, -122.0323133,
/// follow the user with a 0.01° span, recognise long presses after two
/// seconds and draw routes in red at width 4.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use waymark_core::{ControllerConfig, OverlayPolicy};
///
/// let config = ControllerConfig::default().with_overlay_policy(OverlayPolicy::Accumulate);
/// assert_eq!(config.long_press_minimum, Duration::from_secs(2));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Pin placed at startup; `None` skips it.
    pub startup_pin: Option<PinTemplate>,
    /// Labels for pins dropped by long press.
    pub dropped_pin: PinTemplate,
    /// Span used when re-centring on the user.
    pub follow_span: Span,
    /// Minimum hold before a long press is recognised.
    pub long_press_minimum: Duration,
    /// Means of travel requested for routes.
    pub transport: TransportMode,
    /// Stroke used for every route overlay.
    pub route_style: LineStyle,
    /// Treatment of earlier overlays when a route is drawn.
    pub overlay_policy: OverlayPolicy,
    /// Whether region changes are animated.
    pub animate_region_changes: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            startup_pin: Some(PinTemplate::labelled("Destination", "Here you go").at(Coord {
                x: -122.032_313_3,
                y: 37.957_666,
            })),
            dropped_pin: PinTemplate::labelled("Destination", "subtitle"),
            follow_span: DEFAULT_FOLLOW_SPAN,
            long_press_minimum: DEFAULT_LONG_PRESS,
            transport: TransportMode::Automobile,
            route_style: LineStyle::default(),
            overlay_policy: OverlayPolicy::ReplacePrevious,
            animate_region_changes: true,
        }
    }
}

impl ControllerConfig {
    /// Skip the startup pin.
    #[must_use]
    pub fn without_startup_pin(mut self) -> Self {
        self.startup_pin = None;
        self
    }

    /// Set the overlay policy.
    #[must_use]
    pub fn with_overlay_policy(mut self, policy: OverlayPolicy) -> Self {
        self.overlay_policy = policy;
        self
    }

    /// Set the follow span.
    #[must_use]
    pub fn with_follow_span(mut self, span: Span) -> Self {
        self.follow_span = span;
        self
    }

    /// Set the transport mode.
    #[must_use]
    pub fn with_transport(mut self, transport: TransportMode) -> Self {
        self.transport = transport;
        self
    }

    /// Check the configuration for values the controller cannot use.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let span = self.follow_span;
        if !span.is_valid() || span.latitude_delta == 0.0 || span.longitude_delta == 0.0 {
            return Err(ConfigError::InvalidFollowSpan);
        }
        let width = self.route_style.width;
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::InvalidLineWidth);
        }
        if self.long_press_minimum.is_zero() {
            return Err(ConfigError::ZeroLongPress);
        }
        if let Some(coord) = self.startup_pin.as_ref().and_then(|pin| pin.coord)
            && !((-90.0..=90.0).contains(&coord.y) && (-180.0..=180.0).contains(&coord.x))
        {
            return Err(ConfigError::StartupPinOutOfRange);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_config_is_valid() {
        let config = ControllerConfig::default();
        assert_eq!(config.validate(), Ok(()));
        let pin = config.startup_pin.expect("startup pin by default");
        assert_eq!(pin.title, "Destination");
        assert_eq!(pin.subtitle, "Here you go");
        assert_eq!(config.dropped_pin.subtitle, "subtitle");
        assert_eq!(config.follow_span, Span::new(0.01, 0.01));
    }

    #[rstest]
    #[case(Span::new(0.0, 0.01))]
    #[case(Span::new(0.01, -1.0))]
    #[case(Span::new(f64::NAN, 0.01))]
    fn rejects_unusable_follow_span(#[case] span: Span) {
        let config = ControllerConfig::default().with_follow_span(span);
        assert_eq!(config.validate(), Err(ConfigError::InvalidFollowSpan));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-4.0)]
    #[case(f64::INFINITY)]
    fn rejects_unusable_line_width(#[case] width: f64) {
        let mut config = ControllerConfig::default();
        config.route_style.width = width;
        assert_eq!(config.validate(), Err(ConfigError::InvalidLineWidth));
    }

    #[rstest]
    fn rejects_zero_long_press() {
        let config = ControllerConfig {
            long_press_minimum: Duration::ZERO,
            ..ControllerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLongPress));
    }

    #[rstest]
    fn rejects_startup_pin_out_of_range() {
        let config = ControllerConfig {
            startup_pin: Some(PinTemplate::labelled("x", "y").at(Coord { x: 0.0, y: 91.0 })),
            ..ControllerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::StartupPinOutOfRange));
    }

    #[rstest]
    fn startup_pin_can_be_disabled() {
        let config = ControllerConfig::default().without_startup_pin();
        assert!(config.startup_pin.is_none());
        assert_eq!(config.validate(), Ok(()));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn partial_json_falls_back_to_defaults() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{ "overlay_policy": "accumulate" }"#).expect("deserialise");
        assert_eq!(config.overlay_policy, OverlayPolicy::Accumulate);
        assert_eq!(config.long_press_minimum, DEFAULT_LONG_PRESS);
    }
}
