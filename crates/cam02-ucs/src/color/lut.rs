//! sRGB transfer function via tables from `build.rs`.
//!
//! 8-bit input is decoded exactly from a 256-entry table. Arbitrary values
//! go through 4096-entry tables with linear interpolation.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

const LAST: usize = 4095;

#[inline]
pub fn srgb8_to_linear(value: u8) -> f64 {
    SRGB8_TO_LINEAR[value as usize]
}

#[inline]
pub fn srgb_to_linear(encoded: f64) -> f64 {
    lerp_table(&SRGB_TO_LINEAR, encoded)
}

/// Encode linear light. Inverse CAM output is often slightly out of gamut;
/// it saturates at 0 and 1, NaN maps to 0.
#[inline]
pub fn linear_to_srgb(linear: f64) -> f64 {
    lerp_table(&LINEAR_TO_SRGB, linear)
}

#[inline]
fn lerp_table(table: &[f64; LAST + 1], x: f64) -> f64 {
    if !(x > 0.0) {
        return table[0];
    }
    if x >= 1.0 {
        return table[LAST];
    }
    let pos = x * LAST as f64;
    let i = pos as usize;
    let t = pos - i as f64;
    table[i] * (1.0 - t) + table[i + 1] * t
}
