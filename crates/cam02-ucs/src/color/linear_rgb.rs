use super::lut::{srgb8_to_linear, srgb_to_linear};
use super::srgb::Srgb;

/// Linear-light RGB on sRGB primaries.
///
/// In-gamut colors lie in 0.0..=1.0. The inverse appearance model can
/// overshoot in either direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Table enumeration goes through here, one lookup per channel.
    #[inline]
    pub fn from_srgb8(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb.map(srgb8_to_linear);
        Self { r, g, b }
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Srgb> for LinearRgb {
    fn from(srgb: Srgb) -> Self {
        Self::new(
            srgb_to_linear(srgb.r),
            srgb_to_linear(srgb.g),
            srgb_to_linear(srgb.b),
        )
    }
}
