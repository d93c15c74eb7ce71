//! Saving generated palettes and rendering previews.

mod common;

use cam02_ucs::ViewingConditions;
use common::{
    assert_palette_file, assert_png_size, fixtures::SET1, shared_table, test_options,
    write_palette_file,
};
use glasbey::error::PaletteFileError;
use glasbey::models::{BaseSource, PaletteFormat};
use glasbey::rendering::{palette_to_png, SWATCH_HEIGHT, SWATCH_WIDTH};
use glasbey::services::palette_file::{indices_to_colors, load_palette_indices};
use glasbey::services::{check_destination, save_palette, Glasbey, GlasbeyOptions};
use pretty_assertions::assert_eq;

fn generator() -> Glasbey {
    Glasbey::with_table(shared_table(), test_options(), ViewingConditions::default()).unwrap()
}

#[test]
fn test_byte_roundtrip_via_indices() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palette.txt");

    let mut generator = generator();
    let bytes = generator.get_palette(12).unwrap();
    let normalized = generator.get_palette_normalized(12).unwrap();
    save_palette(&path, &normalized, PaletteFormat::Byte, false).unwrap();

    let indices = load_palette_indices(&path).unwrap();
    assert_eq!(indices.len(), 12);
    assert_eq!(indices_to_colors(&indices), bytes);
}

#[test]
fn test_float_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palette.txt");

    let colors = generator().get_palette_normalized(5).unwrap();
    save_palette(&path, &colors, PaletteFormat::Float, false).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    // The white seed
    for part in lines[0].split(',') {
        assert!(part.parse::<f64>().unwrap() > 0.999);
    }
    for line in lines {
        for part in line.split(',') {
            let value: f64 = part.parse().unwrap();
            assert!((0.0..=1.0).contains(&value));
            assert_eq!(part.split('.').nth(1).map(str::len), Some(6));
        }
    }
}

#[test]
fn test_existing_output_needs_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palette.txt");
    std::fs::write(&path, "keep me\n").unwrap();

    let colors = generator().get_palette_normalized(3).unwrap();
    let result = save_palette(&path, &colors, PaletteFormat::Byte, false);
    assert!(matches!(result, Err(PaletteFileError::AlreadyExists(_))));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me\n");

    save_palette(&path, &colors, PaletteFormat::Byte, true).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);
}

#[test]
fn test_existing_output_rejected_before_base_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_palette_file(dir.path(), "base.txt", &SET1[..3]);
    let output = dir.path().join("out.txt");
    std::fs::write(&output, "keep me\n").unwrap();

    let generate = |overwrite: bool| -> Result<Vec<[u8; 3]>, Box<dyn std::error::Error>> {
        check_destination(&output, overwrite)?;
        let mut generator = Glasbey::with_table(
            shared_table(),
            GlasbeyOptions {
                base: BaseSource::FilePath(base.clone()),
                overwrite_base: true,
                ..test_options()
            },
            ViewingConditions::default(),
        )?;
        let colors = generator.get_palette_normalized(8)?;
        save_palette(&output, &colors, PaletteFormat::Byte, overwrite)?;
        Ok(colors.into_iter().map(|c| c.to_bytes()).collect())
    };

    assert!(generate(false).is_err());
    assert_palette_file(&base, &SET1[..3]);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me\n");

    let palette = generate(true).unwrap();
    assert_eq!(palette.len(), 8);
    assert_palette_file(&base, &palette);
    assert_palette_file(&output, &palette);
}

#[test]
fn test_preview_dimensions() {
    let palette = generator().get_palette(7).unwrap();
    let png = palette_to_png(&palette).unwrap();
    assert_png_size(&png, SWATCH_WIDTH, SWATCH_HEIGHT * 7);
    assert_png_size(&png, 180, 140);
}
