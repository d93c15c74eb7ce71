use std::str::FromStr;

use super::linear_rgb::LinearRgb;
use super::lut::linear_to_srgb;
use crate::error::ParseColorError;

/// Gamma-encoded sRGB with channels nominally in 0.0..=1.0.
///
/// This is the form palettes are written in. Channels may leave the unit
/// range after arithmetic; [`Srgb::to_bytes`] clamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Normalize an 8-bit triple.
    ///
    /// ```
    /// use cam02_ucs::Srgb;
    /// assert_eq!(Srgb::from_bytes([255, 0, 51]).b, 0.2);
    /// ```
    #[inline]
    pub fn from_bytes(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb.map(|v| v as f64 / 255.0);
        Self { r, g, b }
    }

    /// Nearest 8-bit triple, saturating outside the gamut.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
    }

    /// `#rrggbb`, lowercase.
    ///
    /// ```
    /// use cam02_ucs::Srgb;
    /// assert_eq!(Srgb::from_bytes([228, 26, 28]).to_hex(), "#e41a1c");
    /// ```
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl From<LinearRgb> for Srgb {
    fn from(linear: LinearRgb) -> Self {
        Self::new(
            linear_to_srgb(linear.r),
            linear_to_srgb(linear.g),
            linear_to_srgb(linear.b),
        )
    }
}

/// Six hex digits, optionally after `#`.
impl FromStr for Srgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ParseColorError::WrongLength(digits.chars().count()));
        }

        let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16);
        Ok(Self::from_bytes([channel(0)?, channel(2)?, channel(4)?]))
    }
}
