//! Glasbey - maximally distinguishable categorical color palettes
//!
//! Colors are chosen greedily from every RGB color, each new one as far as
//! possible (in CAM02-UCS) from those already picked.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

pub use error::GlasbeyError;
pub use models::{BaseSource, FilterSpec, PaletteFormat, Range};
pub use services::{Glasbey, GlasbeyOptions};
