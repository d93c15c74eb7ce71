pub mod base;
pub mod config;
pub mod filter;
pub mod format;

pub use base::BaseSource;
pub use config::AppConfig;
pub use filter::{FilterSpec, Range, DEFAULT_BLACK_THRESHOLD};
pub use format::PaletteFormat;
