//! CIE XYZ tristimulus values
//!
//! Scaled so that the reference white has Y = 100, the convention used by
//! CIECAM02.

use super::linear_rgb::LinearRgb;
use crate::matrix::{self, Mat3};

/// Linear sRGB (D65) to XYZ, IEC 61966-2-1 coefficients.
pub(crate) const SRGB_TO_XYZ: Mat3 = [
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
];

/// Exact inverse of [`SRGB_TO_XYZ`].
pub(crate) const XYZ_TO_SRGB: Mat3 = [
    [3.2406254773200533, -1.5372079722103187, -0.4986285986982479],
    [-0.9689307147293194, 1.8757560608852410, 0.0415175238429539],
    [0.0557101204455106, -0.2040210505984867, 1.0569959422543882],
];

/// A color in CIE XYZ space with Y in 0.0..=100.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    /// CIE standard illuminant D65, Y = 100.
    pub const D65: Xyz = Xyz {
        x: 95.047,
        y: 100.0,
        z: 108.883,
    };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub(crate) fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub(crate) fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<LinearRgb> for Xyz {
    fn from(rgb: LinearRgb) -> Self {
        let v = matrix::mul(&SRGB_TO_XYZ, rgb.to_array());
        Self::new(v[0] * 100.0, v[1] * 100.0, v[2] * 100.0)
    }
}

impl From<Xyz> for LinearRgb {
    /// Not clamped: out-of-gamut XYZ yields channels outside 0.0..=1.0.
    fn from(xyz: Xyz) -> Self {
        let v = matrix::mul(&XYZ_TO_SRGB, [xyz.x / 100.0, xyz.y / 100.0, xyz.z / 100.0]);
        LinearRgb::new(v[0], v[1], v[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrices_are_inverse() {
        matrix::assert_identity(&matrix::product(&SRGB_TO_XYZ, &XYZ_TO_SRGB), 1e-12);
    }

    #[test]
    fn test_white_has_y_100() {
        let white = Xyz::from(LinearRgb::new(1.0, 1.0, 1.0));
        assert!((white.y - 100.0).abs() < 1e-9);
        assert!((white.x - 95.05).abs() < 1e-9);
        assert!((white.z - 108.9).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let original = LinearRgb::new(0.2, 0.7, 0.4);
        let back = LinearRgb::from(Xyz::from(original));
        assert!((back.r - 0.2).abs() < 1e-12);
        assert!((back.g - 0.7).abs() < 1e-12);
        assert!((back.b - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_close_to_palette_crate() {
        use palette::white_point::D65;
        use palette::{FromColor, LinSrgb, Xyz as PaletteXyz};

        let linear = LinearRgb::new(0.3, 0.6, 0.9);
        let ours = Xyz::from(linear);
        let theirs: PaletteXyz<D65, f64> = PaletteXyz::from_color(LinSrgb::new(0.3f64, 0.6, 0.9));

        // palette derives its matrix from the primaries; the IEC matrix is rounded.
        assert!((ours.x / 100.0 - theirs.x).abs() < 1e-3);
        assert!((ours.y / 100.0 - theirs.y).abs() < 1e-3);
        assert!((ours.z / 100.0 - theirs.z).abs() < 1e-3);
    }
}
