use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use directory_core::config::DirectoryConfig;
use directory_core::surface::{ControlSurface, StaticSurface};
use directory_core::{Dimension, Directory, Source};
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "directory")]
#[command(about = "Student activity directory", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export JSON Schemas for the activity record
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
    /// Print the selectable values of every filter dimension
    Options {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print matching activities as JSON
    List {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Render matching activities as card markup
    Render {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Write markup here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Static activities page
    Site {
        #[command(subcommand)]
        command: SiteCommands,
    },
}

#[derive(Subcommand)]
enum SchemaCommands {
    /// Export JSON Schema files for canonical types
    Export {
        /// Output directory (default: ./schemas)
        #[arg(long, default_value = "schemas")]
        out_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum SiteCommands {
    /// Write activities.html and activities.json
    Build {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Output directory (default: [site] out_dir from config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// File path or http(s) URL of the activities document
    #[arg(long)]
    source: Option<String>,
}

#[derive(Args)]
struct FilterArgs {
    /// Case-insensitive text search
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    age: Vec<String>,
    #[arg(long = "type")]
    kind: Vec<String>,
    #[arg(long)]
    category: Vec<String>,
    #[arg(long)]
    location: Vec<String>,
    #[arg(long)]
    language: Vec<String>,
}

impl FilterArgs {
    fn into_surface(self) -> StaticSurface {
        let mut surface = StaticSurface {
            search: self.search,
            ..StaticSurface::default()
        };
        surface.select(Dimension::Age, self.age);
        surface.select(Dimension::Type, self.kind);
        surface.select(Dimension::Category, self.category);
        surface.select(Dimension::Location, self.location);
        surface.select(Dimension::Language, self.language);
        surface
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DirectoryConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Schema { command } => match command {
            SchemaCommands::Export { out_dir } => schema_export(out_dir),
        },
        Commands::Options { source } => options(&config, source),
        Commands::List { source, filters } => list(&config, source, filters),
        Commands::Render {
            source,
            filters,
            out,
        } => render(&config, source, filters, out),
        Commands::Site { command } => match command {
            SiteCommands::Build {
                source,
                filters,
                out_dir,
            } => site_build(&config, source, filters, out_dir),
        },
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load the working set. A failed load is already logged by the directory,
/// and the caller carries on with an empty view.
fn open_directory(config: &DirectoryConfig, args: SourceArgs) -> Directory {
    let source = args
        .source
        .as_deref()
        .map(Source::parse)
        .unwrap_or_else(|| config.source());
    tracing::debug!(source = %source, "opening directory");
    let mut directory = Directory::new(config.loader(), config.render_settings());
    directory.load(&source).ok();
    directory
}

fn schema_export(out_dir: PathBuf) -> Result<()> {
    fs::create_dir_all(&out_dir)?;

    let record_schema = schema_for!(directory_core::schema::ActivityRecord);
    let record_json = serde_json::to_string_pretty(&record_schema)?;
    fs::write(out_dir.join("ActivityRecord.schema.json"), record_json)?;

    let list_schema = schema_for!(Vec<directory_core::schema::ActivityRecord>);
    let list_json = serde_json::to_string_pretty(&list_schema)?;
    fs::write(out_dir.join("Activities.schema.json"), list_json)?;

    println!("Exported schemas to {}", out_dir.display());
    Ok(())
}

fn options(config: &DirectoryConfig, source: SourceArgs) -> Result<()> {
    let directory = open_directory(config, source);
    println!("{}", serde_json::to_string_pretty(directory.options())?);
    Ok(())
}

fn list(config: &DirectoryConfig, source: SourceArgs, filters: FilterArgs) -> Result<()> {
    let mut directory = open_directory(config, source);
    let surface = filters.into_surface();
    directory.apply(surface.read_filter());
    println!("{}", serde_json::to_string_pretty(&directory.matching())?);
    Ok(())
}

fn render(
    config: &DirectoryConfig,
    source: SourceArgs,
    filters: FilterArgs,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut directory = open_directory(config, source);
    let mut surface = filters.into_surface();
    let model = directory.sync(&mut surface);

    match out {
        Some(path) => {
            fs::write(&path, &surface.markup)?;
            println!(
                "Rendered {} activities to {}",
                model.card_count(),
                path.display()
            );
        }
        None => print!("{}", surface.markup),
    }
    Ok(())
}

fn site_build(
    config: &DirectoryConfig,
    source: SourceArgs,
    filters: FilterArgs,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let mut directory = open_directory(config, source);
    let filter = filters.into_surface().read_filter();
    let out_dir = out_dir.unwrap_or_else(|| config.site.out_dir.clone());
    let paths = site::build_site(&mut directory, filter, &out_dir, &config.site.page_title)?;
    println!("Wrote {}", paths.page.display());
    Ok(())
}
