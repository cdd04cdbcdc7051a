//! Live position feeds.
//!
//! A [`PositionSource`] wraps the platform's location service. The host
//! forwards each batch of fixes to
//! [`MapController::on_positions`](crate::MapController::on_positions); the
//! source itself only handles permission and streaming state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of the one-time location permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AuthorizationStatus {
    /// The user has not answered the prompt yet.
    #[default]
    NotDetermined,
    /// The user refused access; no fixes will arrive.
    Denied,
    /// The user allowed access while the app is in use.
    Granted,
}

/// Control a stream of position fixes.
///
/// Implementations must tolerate repeated calls to each method.
pub trait PositionSource {
    /// Ask the user for permission to read their location.
    fn request_authorization(&mut self);

    /// Begin delivering position updates.
    fn start_updates(&mut self);

    /// Stop delivering position updates.
    fn stop_updates(&mut self);

    /// Current permission state.
    fn authorization(&self) -> AuthorizationStatus;

    /// Whether updates are being delivered.
    fn is_updating(&self) -> bool;
}
