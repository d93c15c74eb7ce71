pub mod color_table;
pub mod converter;
pub mod glasbey;
pub mod palette_builder;
pub mod palette_file;
pub mod table_store;

pub use color_table::{ColorTable, FilteredColorTable, FULL_LEVELS};
pub use converter::ColorConverter;
pub use glasbey::{Glasbey, GlasbeyOptions};
pub use palette_builder::PaletteBuilder;
pub use palette_file::{check_destination, save_palette};
pub use table_store::{FileTableStore, MemoryTableStore, TableStore};
