//! Dense RGB → CAM02-UCS lookup table.
//!
//! Entries are laid out r-outer, g-middle, b-inner. At full depth the index
//! of `[r, g, b]` is `(r·256 + g)·256 + b`; reduced depths sample each
//! channel at `round(i·255/(levels−1))` so black and white are always the
//! first and last entries.

use crate::error::{CacheError, TableError};
use crate::models::FilterSpec;
use crate::services::converter::ColorConverter;
use crate::services::table_store::TableStore;
use cam02_ucs::Ucs;
use std::time::Instant;

/// Channel depth of the production table
pub const FULL_LEVELS: u16 = 256;

/// Number of entries at full depth (256³)
pub const FULL_SIZE: usize = 1 << 24;

/// Canonical 24-bit index of an 8-bit color
pub fn rgb_index(rgb: [u8; 3]) -> usize {
    ((rgb[0] as usize) << 16) | ((rgb[1] as usize) << 8) | rgb[2] as usize
}

/// Inverse of [`rgb_index`]. Bits above 24 are ignored.
pub fn rgb_from_index(index: usize) -> [u8; 3] {
    [(index >> 16) as u8, (index >> 8) as u8, index as u8]
}

/// Entry count for a table of the given depth
pub fn expected_len(levels: u16) -> usize {
    let levels = levels as usize;
    levels * levels * levels
}

pub fn valid_levels(levels: u16) -> bool {
    (2..=FULL_LEVELS).contains(&levels)
}

/// 8-bit channel value sampled at `level`
pub fn channel_value(level: u16, levels: u16) -> u8 {
    let max = (levels - 1) as u32;
    ((level as u32 * 255 + max / 2) / max) as u8
}

/// Level whose channel value is exactly `value`, if the depth has one
fn level_of(value: u8, levels: u16) -> Option<u16> {
    let max = (levels - 1) as u32;
    let level = ((value as u32 * max + 127) / 255) as u16;
    (channel_value(level, levels) == value).then_some(level)
}

/// Every color of an RGB cube in CAM02-UCS
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    levels: u16,
    colors: Vec<Ucs>,
}

impl ColorTable {
    /// Wrap precomputed entries. Returns `None` when the entry count does
    /// not match the depth.
    pub fn from_colors(levels: u16, colors: Vec<Ucs>) -> Option<Self> {
        (valid_levels(levels) && colors.len() == expected_len(levels))
            .then_some(Self { levels, colors })
    }

    /// Convert every color of the cube, one (r, g) row per converter call.
    pub fn build<C: ColorConverter + ?Sized>(
        levels: u16,
        converter: &C,
    ) -> Result<Self, TableError> {
        if !valid_levels(levels) {
            return Err(TableError::InvalidLevels(levels));
        }

        let started = Instant::now();
        let values: Vec<u8> = (0..levels).map(|i| channel_value(i, levels)).collect();
        let total_rows = values.len() * values.len();
        let report_every = (total_rows / 16).max(1);

        let mut colors = Vec::with_capacity(expected_len(levels));
        let mut row = Vec::with_capacity(values.len());
        let mut rows_done = 0usize;

        for &r in &values {
            for &g in &values {
                row.clear();
                row.extend(values.iter().map(|&b| [r, g, b]));

                let converted = converter.srgb8_to_ucs(&row);
                if converted.len() != row.len() {
                    return Err(TableError::Conversion {
                        expected: row.len(),
                        actual: converted.len(),
                    });
                }
                colors.extend_from_slice(&converted);

                rows_done += 1;
                if rows_done % report_every == 0 {
                    tracing::debug!(
                        percent = rows_done * 100 / total_rows,
                        "Building color table"
                    );
                }
            }
        }

        tracing::info!(
            levels,
            entries = colors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Built color table"
        );

        Ok(Self { levels, colors })
    }

    /// Load the table from `store`, rebuilding and re-saving it when the
    /// cached copy is missing, corrupt or of the wrong shape.
    pub fn load_or_build<C: ColorConverter + ?Sized>(
        store: &dyn TableStore,
        levels: u16,
        converter: &C,
    ) -> Result<Self, TableError> {
        if !valid_levels(levels) {
            return Err(TableError::InvalidLevels(levels));
        }

        let expected = expected_len(levels);
        let cached = store.load().and_then(|table| {
            if table.levels == levels && table.len() == expected {
                Ok(table)
            } else {
                Err(CacheError::ShapeMismatch {
                    expected,
                    found: table.len(),
                })
            }
        });

        match cached {
            Ok(table) => {
                tracing::info!(store = %store.describe(), entries = table.len(), "Loaded color table");
                return Ok(table);
            }
            Err(CacheError::Missing) => {
                tracing::info!(store = %store.describe(), "No cached color table, building");
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(%e, store = %store.describe(), "Discarding cached color table");
            }
            Err(e) => return Err(e.into()),
        }

        let table = Self::build(levels, converter)?;
        match store.save(&table) {
            Ok(()) => tracing::info!(store = %store.describe(), "Saved color table"),
            Err(e) => tracing::warn!(%e, store = %store.describe(), "Failed to save color table"),
        }
        Ok(table)
    }

    /// Restrict the table to the colors passing `filters`.
    ///
    /// Lightness, chroma and hue are checked in that order on the JCh of
    /// each entry, then near-black colors are dropped.
    pub fn filter<C: ColorConverter + ?Sized>(
        &self,
        filters: &FilterSpec,
        converter: &C,
    ) -> FilteredColorTable {
        let mut colors = self.colors.clone();

        if filters.has_polar_filter() {
            colors.retain(|&color| {
                let jch = converter.ucs_to_jch(color);
                filters.lightness.map_or(true, |r| r.contains(jch.j))
                    && filters.chroma.map_or(true, |r| r.contains(jch.c))
                    && filters.hue.map_or(true, |r| r.contains_hue(jch.h))
            });
            tracing::debug!(remaining = colors.len(), "Applied JCh filters");
        }

        if filters.no_black {
            let black = self.black();
            let threshold = filters.black_threshold;
            colors.retain(|color| color.distance(black) > threshold);
            tracing::debug!(remaining = colors.len(), threshold, "Removed near-black colors");
        }

        if colors.is_empty() {
            tracing::warn!("Filters removed every color from the table");
        }

        FilteredColorTable { colors }
    }

    /// The whole table as a candidate pool
    pub fn unfiltered(&self) -> FilteredColorTable {
        FilteredColorTable {
            colors: self.colors.clone(),
        }
    }

    pub fn levels(&self) -> u16 {
        self.levels
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Ucs> {
        self.colors.get(index).copied()
    }

    // `build` and `from_colors` only admit levels >= 2, so the table holds
    // at least 8 entries and both ends are in bounds.
    pub fn black(&self) -> Ucs {
        self.colors[0]
    }

    pub fn white(&self) -> Ucs {
        self.colors[self.colors.len() - 1]
    }

    /// Table index of an 8-bit color, if this depth samples it exactly
    pub fn index_of(&self, rgb: [u8; 3]) -> Option<usize> {
        if self.levels == FULL_LEVELS {
            return Some(rgb_index(rgb));
        }
        let levels = self.levels as usize;
        let r = level_of(rgb[0], self.levels)? as usize;
        let g = level_of(rgb[1], self.levels)? as usize;
        let b = level_of(rgb[2], self.levels)? as usize;
        Some((r * levels + g) * levels + b)
    }

    pub fn lookup(&self, rgb: [u8; 3]) -> Option<Ucs> {
        self.index_of(rgb).and_then(|index| self.get(index))
    }

    pub fn as_slice(&self) -> &[Ucs] {
        &self.colors
    }
}

/// Candidate pool left after filtering. Original table indices are not kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredColorTable {
    colors: Vec<Ucs>,
}

impl FilteredColorTable {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn as_slice(&self) -> &[Ucs] {
        &self.colors
    }

    pub fn into_vec(self) -> Vec<Ucs> {
        self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Range;
    use crate::services::table_store::{encode, MemoryTableStore};
    use cam02_ucs::{Jch, Srgb, ViewingConditions};

    const LEVELS: u16 = 16;

    /// Drops the last color of every batch
    struct LossyConverter;

    impl ColorConverter for LossyConverter {
        fn srgb8_to_ucs(&self, batch: &[[u8; 3]]) -> Vec<Ucs> {
            vec![Ucs::default(); batch.len().saturating_sub(1)]
        }

        fn ucs_to_srgb(&self, _color: Ucs) -> Srgb {
            Srgb::new(0.0, 0.0, 0.0)
        }

        fn ucs_to_jch(&self, _color: Ucs) -> Jch {
            Jch::new(0.0, 0.0, 0.0)
        }
    }

    fn small_table() -> ColorTable {
        ColorTable::build(LEVELS, &ViewingConditions::default()).unwrap()
    }

    #[test]
    fn test_rgb_index_layout() {
        assert_eq!(rgb_index([0, 0, 0]), 0);
        assert_eq!(rgb_index([0, 0, 1]), 1);
        assert_eq!(rgb_index([0, 1, 0]), 256);
        assert_eq!(rgb_index([1, 0, 0]), 65536);
        assert_eq!(rgb_index([255, 255, 255]), FULL_SIZE - 1);
        assert_eq!(rgb_from_index(rgb_index([228, 26, 28])), [228, 26, 28]);
    }

    #[test]
    fn test_channel_values() {
        assert_eq!(channel_value(0, 16), 0);
        assert_eq!(channel_value(1, 16), 17);
        assert_eq!(channel_value(15, 16), 255);
        assert_eq!(channel_value(1, 2), 255);
        for i in 0..=255u16 {
            assert_eq!(channel_value(i, 256), i as u8);
        }
        assert_eq!(level_of(17, 16), Some(1));
        assert_eq!(level_of(18, 16), None);
    }

    #[test]
    fn test_build_shape_and_endpoints() {
        let vc = ViewingConditions::default();
        let table = small_table();

        assert_eq!(table.levels(), LEVELS);
        assert_eq!(table.len(), 4096);
        assert_eq!(table.black(), vc.srgb8_to_ucs([0, 0, 0]));
        assert_eq!(table.white(), vc.srgb8_to_ucs([255, 255, 255]));
    }

    #[test]
    fn test_build_order_is_r_outer_b_inner() {
        let vc = ViewingConditions::default();
        let table = small_table();

        assert_eq!(table.get(1), Some(vc.srgb8_to_ucs([0, 0, 17])));
        assert_eq!(table.get(16), Some(vc.srgb8_to_ucs([0, 17, 0])));
        assert_eq!(table.get(256), Some(vc.srgb8_to_ucs([17, 0, 0])));
    }

    #[test]
    fn test_build_rejects_short_batches() {
        match ColorTable::build(LEVELS, &LossyConverter) {
            Err(TableError::Conversion { expected, actual }) => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            other => panic!("Expected Conversion error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_bad_levels() {
        let vc = ViewingConditions::default();
        assert!(matches!(
            ColorTable::build(1, &vc),
            Err(TableError::InvalidLevels(1))
        ));
        assert!(matches!(
            ColorTable::build(257, &vc),
            Err(TableError::InvalidLevels(257))
        ));
    }

    #[test]
    fn test_from_colors_checks_length() {
        assert!(ColorTable::from_colors(2, vec![Ucs::default(); 8]).is_some());
        assert!(ColorTable::from_colors(2, vec![Ucs::default(); 7]).is_none());
        assert!(ColorTable::from_colors(1, vec![Ucs::default(); 1]).is_none());
    }

    #[test]
    fn test_smallest_table_endpoints() {
        let vc = ViewingConditions::default();
        let table = ColorTable::build(2, &vc).unwrap();

        assert_eq!(table.len(), 8);
        assert_eq!(table.black(), vc.srgb8_to_ucs([0, 0, 0]));
        assert_eq!(table.white(), vc.srgb8_to_ucs([255, 255, 255]));
        assert!(ColorTable::from_colors(0, Vec::new()).is_none());
    }

    #[test]
    fn test_lookup_exact_levels_only() {
        let vc = ViewingConditions::default();
        let table = small_table();

        assert_eq!(table.lookup([255, 0, 0]), Some(vc.srgb8_to_ucs([255, 0, 0])));
        assert_eq!(table.lookup([34, 51, 68]), Some(vc.srgb8_to_ucs([34, 51, 68])));
        assert_eq!(table.lookup([228, 26, 28]), None);
    }

    #[test]
    fn test_load_or_build_uses_cache() {
        let vc = ViewingConditions::default();
        let table = small_table();
        let store = MemoryTableStore::with_bytes(encode(&table));

        let loaded = ColorTable::load_or_build(&store, LEVELS, &LossyConverter).unwrap();
        assert_eq!(loaded, table);
        assert_eq!(store.saves(), 0);

        // A wrong-depth cache is rebuilt and replaced
        let rebuilt = ColorTable::load_or_build(&store, 8, &vc).unwrap();
        assert_eq!(rebuilt.len(), 512);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_load_or_build_missing_builds_and_saves() {
        let store = MemoryTableStore::new();
        let table =
            ColorTable::load_or_build(&store, LEVELS, &ViewingConditions::default()).unwrap();

        assert_eq!(table.len(), 4096);
        assert_eq!(store.saves(), 1);
        assert!(store.bytes().is_some());
    }

    #[test]
    fn test_filter_noop() {
        let table = small_table();
        let filtered = table.filter(&FilterSpec::default(), &ViewingConditions::default());
        assert_eq!(filtered.as_slice(), table.as_slice());
    }

    #[test]
    fn test_filter_no_black() {
        let table = small_table();
        let filters = FilterSpec {
            no_black: true,
            ..Default::default()
        };
        let filtered = table.filter(&filters, &ViewingConditions::default());

        assert!(filtered.len() < table.len());
        assert!(!filtered.as_slice().contains(&table.black()));
        for color in filtered.as_slice() {
            assert!(color.distance(table.black()) > 35.0);
        }
    }

    #[test]
    fn test_filter_lightness() {
        let vc = ViewingConditions::default();
        let table = small_table();
        let filters = FilterSpec {
            lightness: Some(Range::new(40.0, 60.0)),
            ..Default::default()
        };
        let filtered = table.filter(&filters, &vc);

        assert!(!filtered.is_empty());
        for &color in filtered.as_slice() {
            let j = vc.ucs_to_jch(color).j;
            assert!((40.0..=60.0).contains(&j), "J = {j}");
        }
    }

    #[test]
    fn test_filter_hue_wraparound() {
        let vc = ViewingConditions::default();
        let table = small_table();
        let filters = FilterSpec {
            hue: Some(Range::new(315.0, 45.0)),
            ..Default::default()
        };
        let filtered = table.filter(&filters, &vc);

        assert!(!filtered.is_empty());
        for &color in filtered.as_slice() {
            let h = vc.ucs_to_jch(color).h;
            assert!(h >= 315.0 || h <= 45.0, "h = {h}");
        }
        // Pure red sits inside the wrapped range
        assert!(filtered.as_slice().contains(&vc.srgb8_to_ucs([255, 0, 0])));
    }

    #[test]
    fn test_filter_everything() {
        let table = small_table();
        let filters = FilterSpec {
            chroma: Some(Range::new(500.0, 600.0)),
            ..Default::default()
        };
        assert!(table.filter(&filters, &ViewingConditions::default()).is_empty());
    }
}
