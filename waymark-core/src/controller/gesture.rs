use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ScreenPoint;

/// Lifecycle stage reported by a continuous gesture recogniser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GesturePhase {
    /// The gesture has started.
    Began,
    /// The gesture moved.
    Changed,
    /// The gesture finished normally.
    Ended,
    /// The gesture was interrupted.
    Cancelled,
}

/// A completed press-and-hold on the map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LongPress {
    /// Where the finger was held.
    pub point: ScreenPoint,
    /// How long the finger was held.
    pub held: Duration,
}

impl LongPress {
    /// Construct a press at `point` held for `held`.
    #[must_use]
    pub const fn new(point: ScreenPoint, held: Duration) -> Self {
        Self { point, held }
    }
}
