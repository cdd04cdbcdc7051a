//! Stroke styles for route overlays.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel; `255` is opaque.
    pub a: u8,
}

impl Rgba {
    /// Opaque red.
    pub const RED: Self = Self::opaque(255, 0, 0);

    /// Construct an opaque colour.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }

    /// Format as `#rrggbbaa`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Solid stroke used to render a route overlay.
///
/// # Examples
/// ```
/// use waymark_core::{LineStyle, Rgba};
///
/// let style = LineStyle::default();
/// assert_eq!(style.color, Rgba::RED);
/// assert_eq!(style.width, 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineStyle {
    /// Stroke colour.
    pub color: Rgba,
    /// Stroke width in points.
    pub width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Rgba::RED,
            width: 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_formats_as_hex() {
        assert_eq!(Rgba::RED.to_hex(), "#ff0000ff");
    }

    #[test]
    fn translucent_colour_keeps_alpha() {
        let colour = Rgba {
            r: 0x12,
            g: 0x34,
            b: 0x56,
            a: 0x80,
        };
        assert_eq!(colour.to_hex(), "#12345680");
    }
}
