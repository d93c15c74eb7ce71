use crate::error::PaletteFileError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Text encoding of a palette file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteFormat {
    /// `r,g,b` integers in 0..=255
    #[default]
    Byte,
    /// `r,g,b` normalized to 0..=1 with six decimals
    Float,
}

impl fmt::Display for PaletteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteFormat::Byte => f.write_str("byte"),
            PaletteFormat::Float => f.write_str("float"),
        }
    }
}

impl FromStr for PaletteFormat {
    type Err = PaletteFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "byte" => Ok(PaletteFormat::Byte),
            "float" => Ok(PaletteFormat::Float),
            _ => Err(PaletteFileError::UnknownFormat(s.to_string())),
        }
    }
}
