//! Plain-text palette files.
//!
//! One color per line as `r,g,b`. Byte files hold integers in 0..=255,
//! float files hold normalized components with six decimals. Only byte
//! files are read back.

use crate::error::PaletteFileError;
use crate::models::PaletteFormat;
use crate::services::color_table::{rgb_from_index, rgb_index};
use cam02_ucs::Srgb;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Parse a byte-format palette. Blank lines are skipped.
pub fn read_palette<R: BufRead>(reader: R) -> Result<Vec<[u8; 3]>, PaletteFileError> {
    let mut colors = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        colors.push(parse_line(line, number + 1)?);
    }

    Ok(colors)
}

fn parse_line(line: &str, number: usize) -> Result<[u8; 3], PaletteFileError> {
    let invalid = |reason: String| PaletteFileError::InvalidLine {
        line: number,
        reason,
    };

    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(invalid(format!(
            "expected 3 components, found {}",
            parts.len()
        )));
    }

    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        let value: i64 = part
            .parse()
            .map_err(|_| invalid(format!("'{part}' is not an integer")))?;
        *slot = u8::try_from(value)
            .map_err(|_| invalid(format!("component {value} outside 0..=255")))?;
    }
    Ok(rgb)
}

pub fn load_palette_file(path: &Path) -> Result<Vec<[u8; 3]>, PaletteFileError> {
    let file = std::fs::File::open(path)?;
    read_palette(BufReader::new(file))
}

/// Load a byte-format palette as 24-bit color indices
pub fn load_palette_indices(path: &Path) -> Result<Vec<usize>, PaletteFileError> {
    Ok(load_palette_file(path)?
        .into_iter()
        .map(rgb_index)
        .collect())
}

/// Colors for 24-bit indices, as produced by [`load_palette_indices`]
pub fn indices_to_colors(indices: &[usize]) -> Vec<[u8; 3]> {
    indices.iter().map(|&index| rgb_from_index(index)).collect()
}

pub fn write_palette<W: Write>(
    mut writer: W,
    colors: &[Srgb],
    format: PaletteFormat,
) -> std::io::Result<()> {
    for &color in colors {
        match format {
            PaletteFormat::Byte => {
                let [r, g, b] = color.to_bytes();
                writeln!(writer, "{r},{g},{b}")?;
            }
            PaletteFormat::Float => {
                writeln!(
                    writer,
                    "{:.6},{:.6},{:.6}",
                    color.r.abs(),
                    color.g.abs(),
                    color.b.abs()
                )?;
            }
        }
    }
    writer.flush()
}

/// Write `colors` to `path`. An existing file is only replaced when
/// `overwrite` is set.
/// Fail early when `path` exists and may not be replaced, so callers can
/// refuse before doing any work with side effects.
pub fn check_destination(path: &Path, overwrite: bool) -> Result<(), PaletteFileError> {
    if !overwrite && path.exists() {
        return Err(PaletteFileError::AlreadyExists(path.to_path_buf()));
    }
    Ok(())
}

pub fn save_palette(
    path: &Path,
    colors: &[Srgb],
    format: PaletteFormat,
    overwrite: bool,
) -> Result<(), PaletteFileError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let file = options.open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            PaletteFileError::AlreadyExists(path.to_path_buf())
        } else {
            PaletteFileError::Io(e)
        }
    })?;

    write_palette(BufWriter::new(file), colors, format)?;
    tracing::debug!(path = %path.display(), colors = colors.len(), %format, "Saved palette");
    Ok(())
}
