mod order;

pub use order::ChannelOrder;
use smart_leds::{RGB8, hsv::Hsv as HSV, hsv::hsv2rgb};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Color state of a single LED
///
/// Hue is a position on the 0-255 color wheel. Saturation and value are
/// normalized to `0.0..=1.0`; every effect works in this unit and the
/// controller converts to 8-bit channels only when packing a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedColor {
    pub hue: u8,
    pub sat: f32,
    pub val: f32,
}

impl Default for LedColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl LedColor {
    pub const BLACK: Self = Self {
        hue: 0,
        sat: 0.0,
        val: 0.0,
    };

    /// Create a color, clamping saturation and value into range
    pub fn new(hue: u8, sat: f32, val: f32) -> Self {
        Self {
            hue,
            sat: sat.clamp(0.0, 1.0),
            val: val.clamp(0.0, 1.0),
        }
    }

    /// Create a color from 8-bit channels
    pub fn from_hsv8(hue: u8, sat: u8, val: u8) -> Self {
        Self {
            hue,
            sat: unit_from_u8(sat),
            val: unit_from_u8(val),
        }
    }

    /// Same color with a different value
    #[must_use]
    pub fn with_value(self, val: f32) -> Self {
        Self::new(self.hue, self.sat, val)
    }

    /// Convert to the 8-bit HSV representation used by `smart-leds`
    pub fn to_hsv(self) -> Hsv {
        Hsv {
            hue: self.hue,
            sat: unit_to_u8(self.sat),
            val: unit_to_u8(self.val),
        }
    }

    /// Convert to RGB
    pub fn to_rgb(self) -> Rgb {
        hsv2rgb(self.to_hsv())
    }
}

/// Convert a normalized level to 0-255, rounding to nearest
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit_to_u8(level: f32) -> u8 {
    (level.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Convert a 0-255 channel to a normalized level
pub fn unit_from_u8(value: u8) -> f32 {
    f32::from(value) / 255.0
}

/// Wrap an unbounded hue onto the 0-255 wheel
///
/// The value is truncated toward zero before wrapping, so `-0.5` maps to
/// `0` and `-1.0` maps to `255`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn wrap_hue(hue: f32) -> u8 {
    (libm::truncf(hue) as i32).rem_euclid(256) as u8
}
