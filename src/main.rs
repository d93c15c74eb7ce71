use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cam02_ucs::ViewingConditions;
use glasbey::models::config::{CACHE_ENV, CONFIG_ENV};
use glasbey::models::{AppConfig, BaseSource, FilterSpec, PaletteFormat, Range};
use glasbey::rendering::save_preview;
use glasbey::services::palette_file;
use glasbey::services::table_store::payload_digest;
use glasbey::services::{ColorTable, FileTableStore, Glasbey, GlasbeyOptions, TableStore};

#[derive(Parser)]
#[command(name = "glasbey")]
#[command(about = "Generate maximally distinguishable categorical color palettes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a palette and write it to a file
    Generate {
        /// Number of colors, base colors included
        size: usize,

        /// Output palette file
        output: PathBuf,

        /// Start from the colors in this byte-format palette file
        #[arg(long)]
        base_palette: Option<PathBuf>,

        /// Rewrite the base palette file with the extended palette
        #[arg(long, requires = "base_palette")]
        overwrite_base: bool,

        /// Exclude colors close to black
        #[arg(long)]
        no_black: bool,

        /// J'a'b' distance from black below which colors are excluded
        #[arg(long)]
        black_threshold: Option<f32>,

        /// Lightness range MIN,MAX (CIECAM02 J)
        #[arg(long, allow_hyphen_values = true)]
        lightness: Option<Range>,

        /// Chroma range MIN,MAX (CIECAM02 C)
        #[arg(long, allow_hyphen_values = true)]
        chroma: Option<Range>,

        /// Hue range MIN,MAX in degrees, wraps through 0 when MIN > MAX
        #[arg(long, allow_hyphen_values = true)]
        hue: Option<Range>,

        /// Output format: byte or float
        #[arg(long)]
        format: Option<PaletteFormat>,

        /// Also render the palette to this PNG file
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Overwrite the output file if it exists
        #[arg(long, short)]
        force: bool,

        /// Color table cache file
        #[arg(long)]
        cache: Option<PathBuf>,

        /// YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Render a palette file to a PNG swatch image
    View {
        /// Byte-format palette file
        palette: PathBuf,

        /// Output PNG file
        #[arg(long, short)]
        save: PathBuf,
    },
    /// Build or verify the color table cache
    Table {
        /// Color table cache file
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Rebuild even if a valid cache exists
        #[arg(long)]
        rebuild: bool,

        /// YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Options for `glasbey generate`
struct GenerateArgs {
    size: usize,
    output: PathBuf,
    base_palette: Option<PathBuf>,
    overwrite_base: bool,
    no_black: bool,
    black_threshold: Option<f32>,
    lightness: Option<Range>,
    chroma: Option<Range>,
    hue: Option<Range>,
    format: Option<PaletteFormat>,
    preview: Option<PathBuf>,
    force: bool,
    cache: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glasbey=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Some(Commands::Generate {
            size,
            output,
            base_palette,
            overwrite_base,
            no_black,
            black_threshold,
            lightness,
            chroma,
            hue,
            format,
            preview,
            force,
            cache,
            config,
        }) => run_generate_command(GenerateArgs {
            size,
            output,
            base_palette,
            overwrite_base,
            no_black,
            black_threshold,
            lightness,
            chroma,
            hue,
            format,
            preview,
            force,
            cache,
            config,
        }),
        Some(Commands::View { palette, save }) => run_view_command(&palette, &save),
        Some(Commands::Table {
            cache,
            rebuild,
            config,
        }) => run_table_command(cache.as_deref(), rebuild, config.as_deref()),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Generate a palette, CLI flags taking precedence over the config file
fn run_generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    let config = AppConfig::load(args.config.as_deref());
    let defaults = config.filter();

    let filter = FilterSpec {
        lightness: args.lightness.or(defaults.lightness),
        chroma: args.chroma.or(defaults.chroma),
        hue: args.hue.or(defaults.hue),
        no_black: args.no_black || defaults.no_black,
        black_threshold: args.black_threshold.unwrap_or(defaults.black_threshold),
    };
    let options = GlasbeyOptions {
        base: args
            .base_palette
            .map(BaseSource::FilePath)
            .unwrap_or_default(),
        overwrite_base: args.overwrite_base,
        filter,
        levels: config.levels,
    };

    // Generating may rewrite the base file, refuse before that happens
    palette_file::check_destination(&args.output, args.force)?;

    let store = FileTableStore::new(config.resolve_cache_path(args.cache.as_deref()));
    let mut glasbey = Glasbey::new(options, &store, ViewingConditions::default())?;
    let colors = glasbey.get_palette_normalized(args.size)?;

    let format = args.format.unwrap_or(config.format);
    palette_file::save_palette(&args.output, &colors, format, args.force)?;
    println!(
        "Wrote {} colors to {} ({format})",
        colors.len(),
        args.output.display()
    );

    if let Some(preview) = args.preview {
        let bytes: Vec<[u8; 3]> = colors.iter().map(|c| c.to_bytes()).collect();
        save_preview(&preview, &bytes)?;
        println!("Rendered {}", preview.display());
    }

    Ok(())
}

/// Render an existing palette file to PNG
fn run_view_command(palette: &Path, save: &Path) -> anyhow::Result<()> {
    let colors = palette_file::load_palette_file(palette)?;
    save_preview(save, &colors)?;
    println!(
        "Rendered {} colors from {} to {}",
        colors.len(),
        palette.display(),
        save.display()
    );
    Ok(())
}

/// Make sure a valid color table cache exists
fn run_table_command(
    cache: Option<&Path>,
    rebuild: bool,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let config = AppConfig::load(config);
    let path = config.resolve_cache_path(cache);
    let store = FileTableStore::new(&path);
    let converter = ViewingConditions::default();

    let table = if rebuild {
        let table = ColorTable::build(config.levels, &converter)?;
        store.save(&table)?;
        table
    } else {
        ColorTable::load_or_build(&store, config.levels, &converter)?
    };

    println!(
        "Color table ready: {} entries at {} levels in {}",
        table.len(),
        table.levels(),
        path.display()
    );
    if let Some(digest) = read_digest(&path) {
        println!("  sha256 {digest}");
    }
    Ok(())
}

fn read_digest(path: &Path) -> Option<String> {
    use std::io::Read;

    let mut header = [0u8; 56];
    let mut file = std::fs::File::open(path).ok()?;
    file.read_exact(&mut header).ok()?;
    payload_digest(&header)
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_ENV).ok();
    let cache_env = std::env::var(CACHE_ENV).ok();
    let config = AppConfig::load(None);
    let cache_path = config.resolve_cache_path(None);

    println!("Glasbey v{VERSION}");
    println!("Maximally distinguishable categorical color palettes\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  {CACHE_ENV}  = {}",
        cache_env.as_deref().unwrap_or("(not set)")
    );

    println!("\nColor Table:");
    match std::fs::metadata(&cache_path) {
        Ok(meta) => println!(
            "  {} ({:.1} MiB)",
            cache_path.display(),
            meta.len() as f64 / (1024.0 * 1024.0)
        ),
        Err(_) => println!(
            "  {} (not built yet, run 'glasbey table')",
            cache_path.display()
        ),
    }
    println!("  levels per channel: {}", config.levels);

    let filter = config.filter();
    let describe = |range: Option<Range>| range.map_or("(any)".to_string(), |r| r.to_string());
    println!("\nDefaults:");
    println!("  format          = {}", config.format);
    println!("  no_black        = {}", filter.no_black);
    println!("  black_threshold = {}", filter.black_threshold);
    println!("  lightness       = {}", describe(filter.lightness));
    println!("  chroma          = {}", describe(filter.chroma));
    println!("  hue             = {}", describe(filter.hue));

    println!("\nCommands:");
    println!("  glasbey generate <SIZE> <OUTPUT>   Generate a palette");
    println!("  glasbey view <PALETTE> --save PNG  Render a palette file");
    println!("  glasbey table                      Build or verify the color table");
    println!("\nRun 'glasbey --help' for all options.");
}
