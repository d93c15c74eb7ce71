//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

/// Assert that `shorter` is a prefix of `longer`
pub fn assert_prefix(shorter: &[[u8; 3]], longer: &[[u8; 3]]) {
    assert!(
        shorter.len() <= longer.len(),
        "Prefix has {} colors, palette only {}",
        shorter.len(),
        longer.len()
    );
    assert_eq!(shorter, &longer[..shorter.len()]);
}

/// Assert every color appears once
pub fn assert_distinct(palette: &[[u8; 3]]) {
    for (i, color) in palette.iter().enumerate() {
        if let Some(j) = palette[..i].iter().position(|c| c == color) {
            panic!("Color {color:?} appears at {j} and {i}");
        }
    }
}

/// Assert a file holds the given byte-format palette
pub fn assert_palette_file(path: &std::path::Path, expected: &[[u8; 3]]) {
    let colors = glasbey::services::palette_file::load_palette_file(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    assert_eq!(colors, expected);
}

/// Assert bytes are a PNG of the given size
pub fn assert_png_size(bytes: &[u8], width: u32, height: u32) {
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().expect("Expected a valid PNG");
    let info = reader.info();
    assert_eq!((info.width, info.height), (width, height));
}
