//! CIECAM02 viewing conditions and the forward/inverse appearance model.
//!
//! Follows CIE 159:2004. All intermediate math is `f64`; only the final
//! [`Ucs`] coordinates are narrowed to `f32`.

use std::f64::consts::PI;

use super::polar::{wrap_degrees, Jch, Jmh};
use super::ucs::Ucs;
use crate::color::{LinearRgb, Srgb, Xyz};
use crate::matrix::{self, Mat3};

const CAT02: Mat3 = [
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0030, 0.0136, 0.9834],
];

const CAT02_INV: Mat3 = [
    [1.0961238208355142, -0.2788690002182873, 0.1827451793827731],
    [0.4543690419753592, 0.4735331543074117, 0.0720978037172291],
    [-0.0096276087384294, -0.0056980312161134, 1.0153256399545427],
];

/// Hunt-Pointer-Estevez applied to CAT02-inverse (HPE · CAT02⁻¹).
const CAT02_TO_HPE: Mat3 = [
    [0.7409790970135308, 0.2180251556757356, 0.0410057473107336],
    [0.2853532916858800, 0.6242015741188158, 0.0904451341953042],
    [-0.0096276087384294, -0.0056980312161134, 1.0153256399545427],
];

/// CAT02 applied to HPE-inverse (CAT02 · HPE⁻¹).
const HPE_TO_CAT02: Mat3 = [
    [1.5591523979049677, -0.5447226796590879, -0.0144453097698589],
    [-0.7143267176368627, 1.8503099728895096, -0.1359761119854705],
    [0.0107755117023383, 0.0052187662221759, 0.9840056143203688],
];

/// Surround parameters `F`, `c` and `N_c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surround {
    pub f: f64,
    pub c: f64,
    pub n_c: f64,
}

impl Surround {
    pub const AVERAGE: Surround = Surround {
        f: 1.0,
        c: 0.69,
        n_c: 1.0,
    };
    pub const DIM: Surround = Surround {
        f: 0.9,
        c: 0.59,
        n_c: 0.9,
    };
    pub const DARK: Surround = Surround {
        f: 0.8,
        c: 0.525,
        n_c: 0.8,
    };
}

/// A CIECAM02 observer: white point, adapting luminance, background and
/// surround, together with every constant derived from them.
///
/// Construction precomputes the derived constants once, so per-color
/// conversions only do the per-color work.
///
/// # Example
///
/// ```
/// use cam02_ucs::ViewingConditions;
///
/// let vc = ViewingConditions::default();
/// let white = vc.srgb8_to_ucs([255, 255, 255]);
/// assert!((white.j - 100.0).abs() < 0.5);
///
/// let back = vc.ucs_to_srgb(white);
/// assert_eq!(back.to_bytes(), [255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ViewingConditions {
    white: Xyz,
    adapting_luminance: f64,
    background: f64,
    surround: Surround,

    d_rgb: [f64; 3],
    f_l: f64,
    f_l_quarter: f64,
    n: f64,
    exponent: f64,
    n_bb: f64,
    n_cb: f64,
    a_w: f64,
    chroma_scale: f64,
}

impl ViewingConditions {
    /// Create viewing conditions.
    ///
    /// * `white` - adopted white in XYZ, Y = 100
    /// * `adapting_luminance` - `L_A` in cd/m²
    /// * `background` - relative background luminance `Y_b`
    /// * `surround` - surround parameters
    pub fn new(white: Xyz, adapting_luminance: f64, background: f64, surround: Surround) -> Self {
        let l_a = adapting_luminance;

        let rgb_w = matrix::mul(&CAT02, white.to_array());
        let d = (surround.f * (1.0 - (1.0 / 3.6) * ((-l_a - 42.0) / 92.0).exp())).clamp(0.0, 1.0);
        let d_rgb = rgb_w.map(|c| d * white.y / c + 1.0 - d);

        let k = 1.0 / (5.0 * l_a + 1.0);
        let k4 = k.powi(4);
        let f_l = 0.2 * k4 * (5.0 * l_a) + 0.1 * (1.0 - k4).powi(2) * (5.0 * l_a).cbrt();

        let n = background / white.y;
        let z = 1.48 + n.sqrt();
        let n_bb = 0.725 * (1.0 / n).powf(0.2);

        let rgb_wc = [d_rgb[0] * rgb_w[0], d_rgb[1] * rgb_w[1], d_rgb[2] * rgb_w[2]];
        let rgb_aw = matrix::mul(&CAT02_TO_HPE, rgb_wc).map(|c| adapt(c, f_l));
        let a_w = achromatic(rgb_aw, n_bb);

        Self {
            white,
            adapting_luminance,
            background,
            surround,
            d_rgb,
            f_l,
            f_l_quarter: f_l.powf(0.25),
            n,
            exponent: surround.c * z,
            n_bb,
            n_cb: n_bb,
            a_w,
            chroma_scale: (1.64 - 0.29f64.powf(n)).powf(0.73),
        }
    }

    /// The conditions CAM02-UCS is conventionally evaluated under for sRGB
    /// content: D65 white, `L_A = 64/π/5`, `Y_b = 20`, average surround.
    pub fn srgb() -> Self {
        Self::new(Xyz::D65, (64.0 / PI) / 5.0, 20.0, Surround::AVERAGE)
    }

    pub fn white(&self) -> Xyz {
        self.white
    }

    pub fn adapting_luminance(&self) -> f64 {
        self.adapting_luminance
    }

    pub fn background(&self) -> f64 {
        self.background
    }

    pub fn surround(&self) -> Surround {
        self.surround
    }

    /// Forward model: XYZ to lightness, colorfulness and hue.
    pub fn xyz_to_jmh(&self, xyz: Xyz) -> Jmh {
        let rgb = matrix::mul(&CAT02, xyz.to_array());
        let rgb_c = [
            self.d_rgb[0] * rgb[0],
            self.d_rgb[1] * rgb[1],
            self.d_rgb[2] * rgb[2],
        ];
        let [r, g, b] = matrix::mul(&CAT02_TO_HPE, rgb_c).map(|c| adapt(c, self.f_l));

        let a = r - 12.0 * g / 11.0 + b / 11.0;
        let bb = (r + g - 2.0 * b) / 9.0;
        let h = wrap_degrees(bb.atan2(a).to_degrees());

        // Black lands on A = 0 exactly; rounding can push it below.
        let big_a = achromatic([r, g, b], self.n_bb).max(0.0);
        let j = 100.0 * (big_a / self.a_w).powf(self.exponent);

        let e_t = eccentricity(h);
        let t = (50000.0 / 13.0 * self.surround.n_c * self.n_cb * e_t * a.hypot(bb))
            / (r + g + 21.0 / 20.0 * b);
        let c = t.max(0.0).powf(0.9) * (j / 100.0).sqrt() * self.chroma_scale;

        Jmh::new(j, c * self.f_l_quarter, h)
    }

    /// Inverse model: lightness, colorfulness and hue back to XYZ.
    pub fn jmh_to_xyz(&self, jmh: Jmh) -> Xyz {
        if jmh.j <= 0.0 {
            return Xyz::new(0.0, 0.0, 0.0);
        }

        let c = jmh.m / self.f_l_quarter;
        let t = (c / ((jmh.j / 100.0).sqrt() * self.chroma_scale)).powf(1.0 / 0.9);
        let big_a = self.a_w * (jmh.j / 100.0).powf(1.0 / self.exponent);
        let p2 = big_a / self.n_bb + 0.305;

        let (a, b) = if t <= 0.0 {
            (0.0, 0.0)
        } else {
            let h = jmh.h.to_radians();
            let (sin_h, cos_h) = h.sin_cos();
            let p1 = 50000.0 / 13.0 * self.surround.n_c * self.n_cb * eccentricity(jmh.h) / t;
            let p3 = 21.0 / 20.0;

            if sin_h.abs() >= cos_h.abs() {
                let p4 = p1 / sin_h;
                let b = p2 * (2.0 + p3) * (460.0 / 1403.0)
                    / (p4 + (2.0 + p3) * (220.0 / 1403.0) * (cos_h / sin_h) - 27.0 / 1403.0
                        + p3 * (6300.0 / 1403.0));
                (b * cos_h / sin_h, b)
            } else {
                let p5 = p1 / cos_h;
                let a = p2 * (2.0 + p3) * (460.0 / 1403.0)
                    / (p5 + (2.0 + p3) * (220.0 / 1403.0)
                        - (27.0 / 1403.0 - p3 * (6300.0 / 1403.0)) * (sin_h / cos_h));
                (a, a * sin_h / cos_h)
            }
        };

        let rgb_a = [
            (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0,
            (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0,
            (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0,
        ];
        let rgb_p = rgb_a.map(|c| unadapt(c, self.f_l));
        let rgb_c = matrix::mul(&HPE_TO_CAT02, rgb_p);
        let rgb = [
            rgb_c[0] / self.d_rgb[0],
            rgb_c[1] / self.d_rgb[1],
            rgb_c[2] / self.d_rgb[2],
        ];
        Xyz::from_array(matrix::mul(&CAT02_INV, rgb))
    }

    /// Swap colorfulness for chroma.
    pub fn jmh_to_jch(&self, jmh: Jmh) -> Jch {
        Jch::new(jmh.j, jmh.m / self.f_l_quarter, jmh.h)
    }

    /// Swap chroma for colorfulness.
    pub fn jch_to_jmh(&self, jch: Jch) -> Jmh {
        Jmh::new(jch.j, jch.c * self.f_l_quarter, jch.h)
    }

    /// 8-bit sRGB to J'a'b'.
    #[inline]
    pub fn srgb8_to_ucs(&self, rgb: [u8; 3]) -> Ucs {
        self.linear_to_ucs(LinearRgb::from_srgb8(rgb))
    }

    /// Normalized sRGB to J'a'b'.
    #[inline]
    pub fn srgb_to_ucs(&self, srgb: Srgb) -> Ucs {
        self.linear_to_ucs(LinearRgb::from(srgb))
    }

    /// J'a'b' to normalized sRGB, clamped to the displayable gamut.
    pub fn ucs_to_srgb(&self, ucs: Ucs) -> Srgb {
        let xyz = self.jmh_to_xyz(Jmh::from(ucs));
        Srgb::from(LinearRgb::from(xyz))
    }

    /// J'a'b' to CIECAM02 lightness, chroma and hue.
    #[inline]
    pub fn ucs_to_jch(&self, ucs: Ucs) -> Jch {
        self.jmh_to_jch(Jmh::from(ucs))
    }

    /// Convert a contiguous batch of 8-bit colors, replacing the contents
    /// of `out`.
    pub fn srgb8_to_ucs_batch(&self, batch: &[[u8; 3]], out: &mut Vec<Ucs>) {
        out.clear();
        out.reserve(batch.len());
        out.extend(batch.iter().map(|&rgb| self.srgb8_to_ucs(rgb)));
    }

    #[inline]
    fn linear_to_ucs(&self, linear: LinearRgb) -> Ucs {
        Ucs::from(self.xyz_to_jmh(Xyz::from(linear)))
    }
}

impl Default for ViewingConditions {
    fn default() -> Self {
        Self::srgb()
    }
}

/// Post-adaptation nonlinear response compression, sign preserving.
#[inline]
fn adapt(c: f64, f_l: f64) -> f64 {
    let t = (f_l * c.abs() / 100.0).powf(0.42);
    c.signum() * 400.0 * t / (t + 27.13) + 0.1
}

#[inline]
fn unadapt(c: f64, f_l: f64) -> f64 {
    let d = c - 0.1;
    let ad = d.abs();
    d.signum() * (100.0 / f_l) * (27.13 * ad / (400.0 - ad)).powf(1.0 / 0.42)
}

#[inline]
fn achromatic(rgb_a: [f64; 3], n_bb: f64) -> f64 {
    (2.0 * rgb_a[0] + rgb_a[1] + rgb_a[2] / 20.0 - 0.305) * n_bb
}

#[inline]
fn eccentricity(h_degrees: f64) -> f64 {
    0.25 * ((h_degrees.to_radians() + 2.0).cos() + 3.8)
}
