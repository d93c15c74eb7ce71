use crate::error::RenderError;
use std::io::Cursor;
use std::path::Path;

/// Swatch width in pixels
pub const SWATCH_WIDTH: u32 = 180;

/// Swatch height in pixels, one swatch per palette color
pub const SWATCH_HEIGHT: u32 = 20;

/// Render `colors` as a column of solid swatches, top to bottom.
pub fn palette_to_png(colors: &[[u8; 3]]) -> Result<Vec<u8>, RenderError> {
    if colors.is_empty() {
        return Err(RenderError::EmptyPalette);
    }

    let height = u32::try_from(colors.len())
        .ok()
        .and_then(|n| n.checked_mul(SWATCH_HEIGHT))
        .ok_or_else(|| RenderError::PngEncode(format!("{} swatches do not fit", colors.len())))?;

    let row_bytes = SWATCH_WIDTH as usize * 3;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for color in colors {
        let row: Vec<u8> = color.iter().copied().cycle().take(row_bytes).collect();
        for _ in 0..SWATCH_HEIGHT {
            pixels.extend_from_slice(&row);
        }
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, SWATCH_WIDTH, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&pixels)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Render and write a preview image
pub fn save_preview(path: &Path, colors: &[[u8; 3]]) -> Result<(), RenderError> {
    let bytes = palette_to_png(colors)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), swatches = colors.len(), "Saved palette preview");
    Ok(())
}
