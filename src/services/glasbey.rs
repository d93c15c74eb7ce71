use crate::error::{ConfigError, GlasbeyError, TableError};
use crate::models::{BaseSource, FilterSpec, PaletteFormat};
use crate::services::color_table::{valid_levels, ColorTable, FULL_LEVELS};
use crate::services::converter::ColorConverter;
use crate::services::palette_builder::PaletteBuilder;
use crate::services::palette_file;
use crate::services::table_store::TableStore;
use cam02_ucs::{Srgb, Ucs, ViewingConditions};
use std::path::{Path, PathBuf};

/// Everything that shapes a palette besides its size
#[derive(Debug, Clone, PartialEq)]
pub struct GlasbeyOptions {
    pub base: BaseSource,
    /// Rewrite the base palette file whenever the palette grows
    pub overwrite_base: bool,
    pub filter: FilterSpec,
    /// Channel depth of the color table
    pub levels: u16,
}

impl Default for GlasbeyOptions {
    fn default() -> Self {
        Self {
            base: BaseSource::None,
            overwrite_base: false,
            filter: FilterSpec::default(),
            levels: FULL_LEVELS,
        }
    }
}

impl GlasbeyOptions {
    /// Check every option and return the base colors
    pub fn validate(&self) -> Result<Vec<[u8; 3]>, ConfigError> {
        if self.overwrite_base && self.base.file_path().is_none() {
            return Err(ConfigError::OverwriteWithoutFile);
        }
        if !valid_levels(self.levels) {
            return Err(ConfigError::InvalidLevels(self.levels));
        }
        self.filter.validate()?;
        self.base.resolve()
    }
}

/// Palette generator: a filtered color table plus a resumable builder
pub struct Glasbey<C: ColorConverter = ViewingConditions> {
    converter: C,
    builder: PaletteBuilder,
    /// Base palette file to keep in sync, when overwriting is enabled
    sync_path: Option<PathBuf>,
    /// Palette size last written to `sync_path`
    persisted_len: usize,
}

impl<C: ColorConverter> Glasbey<C> {
    /// Validate `options`, then load (or build) the color table from
    /// `store` and prepare the builder.
    pub fn new(
        options: GlasbeyOptions,
        store: &dyn TableStore,
        converter: C,
    ) -> Result<Self, GlasbeyError> {
        let base = options.validate()?;
        let table = ColorTable::load_or_build(store, options.levels, &converter)?;
        Self::assemble(&table, &options, base, converter)
    }

    /// Like [`Glasbey::new`] with an already loaded table.
    /// The table depth takes precedence over `options.levels`.
    pub fn with_table(
        table: &ColorTable,
        options: GlasbeyOptions,
        converter: C,
    ) -> Result<Self, GlasbeyError> {
        let base = options.validate()?;
        Self::assemble(table, &options, base, converter)
    }

    fn assemble(
        table: &ColorTable,
        options: &GlasbeyOptions,
        base: Vec<[u8; 3]>,
        converter: C,
    ) -> Result<Self, GlasbeyError> {
        let candidates = table.filter(&options.filter, &converter).into_vec();

        // Base colors are taken as given, filters do not apply to them
        let base_ucs = base
            .iter()
            .map(|&rgb| resolve_color(table, &converter, rgb))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            candidates = candidates.len(),
            base = base_ucs.len(),
            "Prepared palette builder"
        );

        let builder = PaletteBuilder::new(candidates, base_ucs, table.white());
        let sync_path = if options.overwrite_base {
            options.base.file_path().map(Path::to_path_buf)
        } else {
            None
        };

        Ok(Self {
            converter,
            builder,
            sync_path,
            persisted_len: base.len(),
        })
    }

    /// First `size` palette colors as 8-bit sRGB
    pub fn get_palette(&mut self, size: usize) -> Result<Vec<[u8; 3]>, GlasbeyError> {
        Ok(self
            .get_palette_normalized(size)?
            .into_iter()
            .map(Srgb::to_bytes)
            .collect())
    }

    /// First `size` palette colors as normalized sRGB
    pub fn get_palette_normalized(&mut self, size: usize) -> Result<Vec<Srgb>, GlasbeyError> {
        self.builder.extend(size);
        self.sync_base_file()?;

        Ok(self.builder.palette()[..size]
            .iter()
            .map(|&ucs| self.converter.ucs_to_srgb(ucs))
            .collect())
    }

    /// First `size` palette colors as `#rrggbb`
    pub fn get_palette_hex(&mut self, size: usize) -> Result<Vec<String>, GlasbeyError> {
        Ok(self
            .get_palette_normalized(size)?
            .into_iter()
            .map(Srgb::to_hex)
            .collect())
    }

    /// Number of colors generated so far, base colors included
    pub fn len(&self) -> usize {
        self.builder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builder.is_empty()
    }

    /// Colors left in the pool after filtering
    pub fn candidate_count(&self) -> usize {
        self.builder.candidate_count()
    }

    fn sync_base_file(&mut self) -> Result<(), GlasbeyError> {
        let Some(path) = &self.sync_path else {
            return Ok(());
        };
        if self.builder.len() <= self.persisted_len {
            return Ok(());
        }

        let colors: Vec<Srgb> = self
            .builder
            .palette()
            .iter()
            .map(|&ucs| self.converter.ucs_to_srgb(ucs))
            .collect();
        palette_file::save_palette(path, &colors, PaletteFormat::Byte, true)?;
        tracing::info!(path = %path.display(), colors = colors.len(), "Updated base palette");

        self.persisted_len = colors.len();
        Ok(())
    }
}

/// J'a'b' of a display color, from the table when it holds the exact color
fn resolve_color<C: ColorConverter + ?Sized>(
    table: &ColorTable,
    converter: &C,
    rgb: [u8; 3],
) -> Result<Ucs, TableError> {
    if let Some(ucs) = table.lookup(rgb) {
        return Ok(ucs);
    }
    match converter.srgb8_to_ucs(&[rgb]).as_slice() {
        [ucs] => Ok(*ucs),
        other => Err(TableError::Conversion {
            expected: 1,
            actual: other.len(),
        }),
    }
}
