use crate::models::{FilterSpec, PaletteFormat, Range, DEFAULT_BLACK_THRESHOLD};
use crate::services::color_table::FULL_LEVELS;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "GLASBEY_CONFIG";

/// Environment variable overriding the table cache location
pub const CACHE_ENV: &str = "GLASBEY_CACHE";

/// Cache file used when nothing else is configured
pub const DEFAULT_CACHE_FILE: &str = "rgb_cam02ucs_lut.bin";

/// Defaults loaded from an optional YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Location of the color table cache
    pub cache_path: Option<PathBuf>,

    /// Channel depth of the color table
    pub levels: u16,

    pub no_black: bool,
    pub black_threshold: f32,

    pub lightness: Option<Range>,
    pub chroma: Option<Range>,
    pub hue: Option<Range>,

    /// Output format for generated palettes
    pub format: PaletteFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_path: None,
            levels: FULL_LEVELS,
            no_black: false,
            black_threshold: DEFAULT_BLACK_THRESHOLD,
            lightness: None,
            chroma: None,
            hue: None,
            format: PaletteFormat::Byte,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from `$GLASBEY_CONFIG` when no
    /// path is given. Missing or unreadable files fall back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match std::env::var(CONFIG_ENV) {
                Ok(value) if !value.is_empty() => PathBuf::from(value),
                _ => return Self::default(),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Cache location: explicit override, then `$GLASBEY_CACHE`, then the
    /// config file, then the default file name in the working directory.
    pub fn resolve_cache_path(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Ok(value) = std::env::var(CACHE_ENV) {
            if !value.is_empty() {
                return PathBuf::from(value);
            }
        }
        self.cache_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE))
    }

    /// Filter defaults from the config file
    pub fn filter(&self) -> FilterSpec {
        FilterSpec {
            lightness: self.lightness,
            chroma: self.chroma,
            hue: self.hue,
            no_black: self.no_black,
            black_threshold: self.black_threshold,
        }
    }
}
