use crate::error::{ConfigError, PaletteFileError};
use crate::services::palette_file;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where the seed colors of a palette come from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BaseSource {
    /// Start from white
    #[default]
    None,
    /// A palette file in byte format, one `r,g,b` per line
    FilePath(PathBuf),
    /// Literal triples, range-checked before use
    Inline(Vec<(i64, i64, i64)>),
}

impl BaseSource {
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            BaseSource::FilePath(path) => Some(path),
            _ => None,
        }
    }

    /// Read and validate the base colors. Seeds must be pairwise distinct.
    pub fn resolve(&self) -> Result<Vec<[u8; 3]>, ConfigError> {
        let colors = match self {
            BaseSource::None => Vec::new(),
            BaseSource::FilePath(path) => {
                if !path.is_file() {
                    return Err(ConfigError::BaseFileMissing(path.clone()));
                }
                palette_file::load_palette_file(path).map_err(|e| match e {
                    PaletteFileError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                        ConfigError::BaseFileMissing(path.clone())
                    }
                    source => ConfigError::BaseFileInvalid {
                        path: path.clone(),
                        source,
                    },
                })?
            }
            BaseSource::Inline(triples) => triples
                .iter()
                .enumerate()
                .map(|(index, &(r, g, b))| {
                    Ok([
                        component(index, r)?,
                        component(index, g)?,
                        component(index, b)?,
                    ])
                })
                .collect::<Result<Vec<_>, ConfigError>>()?,
        };

        let mut seen = HashMap::with_capacity(colors.len());
        for (index, color) in colors.iter().enumerate() {
            if seen.insert(*color, index).is_some() {
                return Err(ConfigError::DuplicateBaseColor { index });
            }
        }

        Ok(colors)
    }
}

fn component(index: usize, value: i64) -> Result<u8, ConfigError> {
    u8::try_from(value).map_err(|_| ConfigError::ComponentOutOfRange { index, value })
}
