//! Polar CIECAM02 correlates.
//!
//! [`Jmh`] carries colorfulness and is what the uniform space is built
//! from. [`Jch`] carries chroma, the correlate used for gamut filters.
//! Converting between them needs the luminance adaptation factor, see
//! [`ViewingConditions::jmh_to_jch`](crate::ViewingConditions::jmh_to_jch).

/// Lightness, colorfulness and hue angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jmh {
    /// Lightness J, 0.0 (black) to 100.0 (reference white)
    pub j: f64,
    /// Colorfulness M
    pub m: f64,
    /// Hue angle in degrees, 0.0..360.0
    pub h: f64,
}

/// Lightness, chroma and hue angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jch {
    /// Lightness J, 0.0 (black) to 100.0 (reference white)
    pub j: f64,
    /// Chroma C
    pub c: f64,
    /// Hue angle in degrees, 0.0..360.0
    pub h: f64,
}

impl Jmh {
    #[inline]
    pub fn new(j: f64, m: f64, h: f64) -> Self {
        Self { j, m, h }
    }
}

impl Jch {
    #[inline]
    pub fn new(j: f64, c: f64, h: f64) -> Self {
        Self { j, c, h }
    }
}

/// Normalize an angle in degrees into 0.0..360.0.
#[inline]
pub(crate) fn wrap_degrees(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}
