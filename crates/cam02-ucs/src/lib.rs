#![allow(clippy::excessive_precision, clippy::needless_range_loop)]

//! cam02-ucs: perceptual color conversions for palette generation
//!
//! Converts display colors into CAM02-UCS (Luo, Cui and Li, 2006), a
//! uniform space built on the CIECAM02 appearance model, and back.
//!
//! # Quick Start
//!
//! ```
//! use cam02_ucs::ViewingConditions;
//!
//! let vc = ViewingConditions::default();
//! let red = vc.srgb8_to_ucs([255, 0, 0]);
//! let orange = vc.srgb8_to_ucs([255, 128, 0]);
//! let blue = vc.srgb8_to_ucs([0, 0, 255]);
//!
//! // Red is perceptually closer to orange than to blue
//! assert!(red.distance(orange) < red.distance(blue));
//! ```
//!
//! # Color Spaces
//!
//! | Type | Role |
//! |------|------|
//! | [`Srgb`] | Display encoding, palette files |
//! | [`LinearRgb`] | Linear light, input to the XYZ matrix |
//! | [`Xyz`] | Tristimulus values, Y = 100 for white |
//! | [`Jmh`] / [`Jch`] | CIECAM02 lightness, colorfulness/chroma, hue |
//! | [`Ucs`] | CAM02-UCS J'a'b', Euclidean distance ≈ perceived difference |
//!
//! ```text
//! [u8; 3] / Srgb
//!     |  gamma decode (LUT)
//!     v
//! LinearRgb --matrix--> Xyz --CIECAM02--> Jmh --UCS--> Ucs
//!                                          |
//!                                          +--> Jch (gamut filters)
//! ```
//!
//! Every arrow has an inverse; [`ViewingConditions::ucs_to_srgb`] walks the
//! whole chain backwards and clamps to the displayable gamut at the end.
//!
//! The default [`ViewingConditions`] match the conventional CAM02-UCS setup
//! for sRGB content: D65 white, adapting luminance 64/π/5 cd/m², background
//! Y_b = 20, average surround.

pub mod cam;
pub mod color;
mod error;
mod matrix;

pub use cam::{Jch, Jmh, Surround, Ucs, ViewingConditions};
pub use color::{LinearRgb, Srgb, Xyz};
pub use error::ParseColorError;
