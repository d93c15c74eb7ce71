//! CAM02-UCS, the uniform color space of Luo, Cui and Li (2006).
//!
//! J'a'b' coordinates are derived from CIECAM02 J, M and h with
//! `K_L = 1.0, c1 = 0.007, c2 = 0.0228`. Euclidean distance in this space
//! approximates perceived color difference.

use super::polar::{wrap_degrees, Jmh};

const C1: f64 = 0.007;
const C2: f64 = 0.0228;

/// A point in CAM02-UCS (J'a'b').
///
/// Stored as `f32`: a full 8-bit color table holds 16.7 million of these.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ucs {
    /// Uniform lightness J', 0.0 (black) to ~100.0 (white)
    pub j: f32,
    /// Red-green axis a'
    pub a: f32,
    /// Yellow-blue axis b'
    pub b: f32,
}

impl Ucs {
    #[inline]
    pub fn new(j: f32, a: f32, b: f32) -> Self {
        Self { j, a, b }
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Ucs) -> f32 {
        let dj = self.j - other.j;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dj * dj + da * da + db * db
    }

    /// Euclidean distance, the perceptual color difference ΔE'.
    ///
    /// ```
    /// use cam02_ucs::Ucs;
    ///
    /// let a = Ucs::new(50.0, 0.0, 0.0);
    /// let b = Ucs::new(50.0, 3.0, 4.0);
    /// assert_eq!(a.distance(b), 5.0);
    /// ```
    #[inline]
    pub fn distance(self, other: Ucs) -> f32 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.j, self.a, self.b]
    }

    #[inline]
    pub fn from_array(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Jmh> for Ucs {
    fn from(jmh: Jmh) -> Self {
        let j = (1.0 + 100.0 * C1) * jmh.j / (1.0 + C1 * jmh.j);
        let m = (1.0 + C2 * jmh.m).ln() / C2;
        let h = jmh.h.to_radians();
        Ucs::new(j as f32, (m * h.cos()) as f32, (m * h.sin()) as f32)
    }
}

impl From<Ucs> for Jmh {
    fn from(ucs: Ucs) -> Self {
        let jp = ucs.j as f64;
        let (a, b) = (ucs.a as f64, ucs.b as f64);

        let j = jp / (1.0 + 100.0 * C1 - C1 * jp);
        let m = ((C2 * a.hypot(b)).exp() - 1.0) / C2;
        let h = wrap_degrees(b.atan2(a).to_degrees());
        Jmh::new(j, m, h)
    }
}
