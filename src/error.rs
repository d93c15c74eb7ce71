use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for palette generation requests.
#[derive(Debug, Error)]
pub enum GlasbeyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Color table error: {0}")]
    Table(#[from] TableError),

    #[error("Palette file error: {0}")]
    PaletteFile(#[from] PaletteFileError),
}

/// Invalid request configuration. Always detected before any table work.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Base palette file not found: {}", .0.display())]
    BaseFileMissing(PathBuf),

    #[error("Invalid base palette {}: {source}", path.display())]
    BaseFileInvalid {
        path: PathBuf,
        #[source]
        source: PaletteFileError,
    },

    #[error("Base color {index} has component {value} outside 0..=255")]
    ComponentOutOfRange { index: usize, value: i64 },

    #[error("Duplicate base color at index {index}")]
    DuplicateBaseColor { index: usize },

    #[error("Overwriting the base palette requires a base palette file")]
    OverwriteWithoutFile,

    #[error("Invalid {name} range: {min}..{max}")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Invalid range syntax '{0}' (expected MIN,MAX)")]
    RangeSyntax(String),

    #[error("Black threshold must be a non-negative number, got {0}")]
    InvalidBlackThreshold(f32),

    #[error("Table depth must be between 2 and 256 levels, got {0}")]
    InvalidLevels(u16),
}

/// Cache artifact problems.
///
/// `Missing`, `ShapeMismatch` and `Corrupt` are expected conditions that the
/// table loader recovers from by rebuilding. `Io` is anything else.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache not found")]
    Missing,

    #[error("Cache shape mismatch: expected {expected} entries, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("Corrupt cache: {0}")]
    Corrupt(String),

    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    /// Whether the table loader should silently rebuild.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CacheError::Io(_))
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Color conversion returned {actual} colors for a batch of {expected}")]
    Conversion { expected: usize, actual: usize },

    #[error("Invalid table depth: {0} levels")]
    InvalidLevels(u16),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

#[derive(Debug, Error)]
pub enum PaletteFileError {
    #[error("Line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },

    #[error("Refusing to overwrite existing file: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Unknown palette format '{0}' (expected byte or float)")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot render an empty palette")]
    EmptyPalette,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
