//! Command line inspector for LittleArtist templates.
//!
//! ## Usage
//!
//! ```bash
//! # List the elements a template compiles to
//! outline-inspect inspect house.svg --json
//!
//! # Would a touch at (120, 300) on an 800x600 canvas land inside the template?
//! outline-inspect hit house.svg 120 300 --width 800 --height 600
//!
//! # Templates suitable for a five year old, from the configured catalog
//! outline-inspect --config artist.json catalog --age 5 --category animals
//!
//! # Clamp a plan and print its markup
//! outline-inspect plan snowman.json
//! ```

use anyhow::{Context, Result};
use artist_common::{init_logging, LogConfig, LogFormat};
use artist_core::{
    ArtistConfig, PlanLimits, TemplateCatalog, TemplateCategory, TemplatePlan, TemplateQuery,
};
use artist_outline::{FillRule, Point, TemplateMask, Viewport};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod report;

#[derive(Parser)]
#[command(name = "outline-inspect")]
#[command(about = "Inspect LittleArtist template markup, catalogs and plans")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a markup file and list its elements
    Inspect {
        /// Template markup file
        file: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Test whether a display point falls inside a template
    Hit {
        /// Template markup file
        file: PathBuf,
        x: f32,
        y: f32,
        /// Display width
        #[arg(long, default_value = "400")]
        width: f32,
        /// Display height
        #[arg(long, default_value = "400")]
        height: f32,
        /// Use the even-odd rule instead of nonzero
        #[arg(long)]
        even_odd: bool,
    },

    /// List templates from a templates JSON file
    Catalog {
        /// Templates JSON file (defaults to the configured catalog)
        file: Option<PathBuf>,
        /// Only templates suitable for this age
        #[arg(long)]
        age: Option<u8>,
        /// Category filter (all, shapes, animals, ...)
        #[arg(long, default_value = "all")]
        category: String,
        /// Free-text search on name and category
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Validate a template plan and print its markup
    Plan {
        /// Plan JSON file
        file: PathBuf,
        /// Canvas width (defaults to the configured canvas size)
        #[arg(long)]
        width: Option<f64>,
        /// Canvas height (defaults to the configured canvas size)
        #[arg(long)]
        height: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ArtistConfig::load_or_default(cli.config.as_deref())?;
    let mut log_config = LogConfig::from_verbosity(cli.verbose);
    if let Some(filter) = &config.log_filter {
        log_config = log_config.with_filter(filter.clone());
    }
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format);
    }
    init_logging(log_config)?;
    debug!(?config, "configuration");

    match cli.command {
        Commands::Inspect { file, json } => inspect(&config, &file, json),
        Commands::Hit {
            file,
            x,
            y,
            width,
            height,
            even_odd,
        } => {
            let rule = if even_odd {
                FillRule::EvenOdd
            } else {
                FillRule::NonZero
            };
            hit(&config, &file, Point::new(x, y), width, height, rule)
        }
        Commands::Catalog {
            file,
            age,
            category,
            search,
        } => {
            let file = catalog_source(&config, file)?;
            catalog(&config, &file, age, &category, search)
        }
        Commands::Plan {
            file,
            width,
            height,
        } => plan(&config, &file, width, height),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// The file given on the command line, else the configured catalog.
fn catalog_source(config: &ArtistConfig, file: Option<PathBuf>) -> Result<PathBuf> {
    file.or_else(|| config.catalog_file())
        .context("no templates file given and no catalog_path configured")
}

fn inspect(config: &ArtistConfig, file: &Path, json: bool) -> Result<()> {
    let markup = read(file)?;
    let mut cache = config.geometry_cache();
    let elements = cache.elements(&markup);
    let summary = report::summarize(&elements);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}: {} elements", file.display(), summary.len());
    for line in &summary {
        println!("{line}");
    }
    let region = cache.fill_region(&markup);
    println!("fill region: {} ops", region.len());
    Ok(())
}

fn hit(
    config: &ArtistConfig,
    file: &Path,
    point: Point,
    width: f32,
    height: f32,
    rule: FillRule,
) -> Result<()> {
    let markup = read(file)?;
    let viewport = Viewport::with_canvas_size(width, height, config.canvas_size)?;

    let mask = if config.masking_enabled {
        TemplateMask::new(&markup, viewport).with_fill_rule(rule)
    } else {
        TemplateMask::unrestricted(viewport)
    };

    let template_point = viewport.to_template(point);
    let inside = mask.allows(point);
    println!(
        "({}, {}) -> template ({:.1}, {:.1}): {}",
        point.x,
        point.y,
        template_point.x,
        template_point.y,
        if inside { "inside" } else { "outside" }
    );
    Ok(())
}

fn catalog(
    config: &ArtistConfig,
    file: &Path,
    age: Option<u8>,
    category: &str,
    search: String,
) -> Result<()> {
    let text = read(file)?;
    let mut catalog = TemplateCatalog::new();
    catalog
        .import_json_if_empty(&text, &config.age_range)
        .with_context(|| format!("parsing {}", file.display()))?;

    let category: TemplateCategory = category.to_lowercase().parse()?;
    let query = TemplateQuery {
        category,
        age,
        search,
    };

    let matches = catalog.filtered(&query);
    info!(total = catalog.len(), matched = matches.len(), "filtered catalog");
    println!("{} {} ({} of {})", category.icon(), category.title(), matches.len(), catalog.len());
    for template in matches {
        println!("{}", report::template_line(template));
    }
    Ok(())
}

fn plan(config: &ArtistConfig, file: &Path, width: Option<f64>, height: Option<f64>) -> Result<()> {
    let text = read(file)?;
    let mut plan = TemplatePlan::from_json(&text)?;

    let canvas = f64::from(config.canvas_size);
    let limits = PlanLimits::from(&config.plan);
    plan.validate_and_clamp(width.unwrap_or(canvas), height.unwrap_or(canvas), &limits);

    info!(name = %plan.name, elements = plan.elements.len(), "plan ready");
    println!("{}", plan.to_markup());
    Ok(())
}
