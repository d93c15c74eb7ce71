//! Test fixtures and constants.

use cam02_ucs::ViewingConditions;
use glasbey::services::{ColorTable, GlasbeyOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Table depth used by integration tests (32³ = 32768 entries)
pub const TEST_LEVELS: u16 = 32;

/// ColorBrewer Set1, the usual base palette
pub const SET1: [[u8; 3]; 9] = [
    [228, 26, 28],
    [55, 126, 184],
    [77, 175, 74],
    [152, 78, 163],
    [255, 127, 0],
    [255, 255, 51],
    [166, 86, 40],
    [247, 129, 191],
    [153, 153, 153],
];

/// A reduced-depth table built once per test binary
pub fn shared_table() -> &'static ColorTable {
    static TABLE: OnceLock<ColorTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        ColorTable::build(TEST_LEVELS, &ViewingConditions::default())
            .expect("Failed to build test table")
    })
}

/// Default options at test depth
pub fn test_options() -> GlasbeyOptions {
    GlasbeyOptions {
        levels: TEST_LEVELS,
        ..Default::default()
    }
}

/// Write colors as a byte-format palette file
pub fn write_palette_file(dir: &Path, name: &str, colors: &[[u8; 3]]) -> PathBuf {
    let path = dir.join(name);
    let text: String = colors
        .iter()
        .map(|[r, g, b]| format!("{r},{g},{b}\n"))
        .collect();
    std::fs::write(&path, text).expect("Failed to write palette file");
    path
}
