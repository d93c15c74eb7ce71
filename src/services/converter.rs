use cam02_ucs::{Jch, Srgb, Ucs, ViewingConditions};

/// Color conversions needed by the table and the palette builder.
///
/// The production implementation is [`ViewingConditions`]; tests swap in
/// faulty converters to exercise error paths.
pub trait ColorConverter {
    /// Convert a batch of 8-bit sRGB colors to J'a'b'.
    /// Must return exactly one color per input.
    fn srgb8_to_ucs(&self, batch: &[[u8; 3]]) -> Vec<Ucs>;

    /// Convert back to display sRGB, clamped to the gamut
    fn ucs_to_srgb(&self, color: Ucs) -> Srgb;

    /// Polar lightness, chroma and hue
    fn ucs_to_jch(&self, color: Ucs) -> Jch;
}

impl ColorConverter for ViewingConditions {
    fn srgb8_to_ucs(&self, batch: &[[u8; 3]]) -> Vec<Ucs> {
        let mut out = Vec::with_capacity(batch.len());
        self.srgb8_to_ucs_batch(batch, &mut out);
        out
    }

    fn ucs_to_srgb(&self, color: Ucs) -> Srgb {
        ViewingConditions::ucs_to_srgb(self, color)
    }

    fn ucs_to_jch(&self, color: Ucs) -> Jch {
        ViewingConditions::ucs_to_jch(self, color)
    }
}

impl<C: ColorConverter + ?Sized> ColorConverter for &C {
    fn srgb8_to_ucs(&self, batch: &[[u8; 3]]) -> Vec<Ucs> {
        (**self).srgb8_to_ucs(batch)
    }

    fn ucs_to_srgb(&self, color: Ucs) -> Srgb {
        (**self).ucs_to_srgb(color)
    }

    fn ucs_to_jch(&self, color: Ucs) -> Jch {
        (**self).ucs_to_jch(color)
    }
}
