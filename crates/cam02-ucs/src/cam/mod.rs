//! CIECAM02 color appearance model and its uniform space
//!
//! - [`ViewingConditions`]: the observer, and the forward/inverse model
//! - [`Jmh`], [`Jch`]: polar appearance correlates
//! - [`Ucs`]: CAM02-UCS Cartesian coordinates, used for distances

mod polar;
mod ucs;
mod viewing;

pub use polar::{Jch, Jmh};
pub use ucs::Ucs;
pub use viewing::{Surround, ViewingConditions};
