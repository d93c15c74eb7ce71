pub mod preview;

pub use preview::{palette_to_png, save_preview, SWATCH_HEIGHT, SWATCH_WIDTH};
