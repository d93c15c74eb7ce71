//! Display-side color spaces
//!
//! - **Srgb**: gamma-encoded display color, used for I/O.
//! - **LinearRgb**: linear light, the only space the XYZ matrix applies to.
//! - **Xyz**: CIE tristimulus values, the input to the appearance model.
//!
//! # Example
//!
//! ```
//! use cam02_ucs::{LinearRgb, Srgb, Xyz};
//!
//! let srgb = Srgb::from_bytes([128, 64, 32]);
//! let xyz = Xyz::from(LinearRgb::from(srgb));
//! let back = Srgb::from(LinearRgb::from(xyz));
//! assert_eq!(back.to_bytes(), [128, 64, 32]);
//! ```

mod linear_rgb;
mod lut;
mod srgb;
mod xyz;

pub use linear_rgb::LinearRgb;
pub use srgb::Srgb;
pub use xyz::Xyz;
