//! Command-line entry point: regenerates the icon assets.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use icon_forge::{GenerateError, Generator, IconCatalog, IconRenderer, UnavailableRasterizer};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Generate PNG icon assets for every style, icon and size.
#[derive(Parser, Debug)]
#[command(name = "icon-forge", version, about)]
struct Args {
    /// Directory the PNG files are written to (created if missing).
    #[arg(long, value_name = "DIR", default_value = "app/assets")]
    out_dir: PathBuf,

    /// JSON catalog replacing the built-in icon and style tables.
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Print the effective catalog as JSON and exit.
    #[arg(long)]
    dump_catalog: bool,

    /// Skip vector rendering and draw every icon with the letter fallback.
    #[arg(long)]
    fallback_only: bool,

    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), GenerateError> {
    let catalog = match &args.catalog {
        Some(path) => IconCatalog::load(path)?,
        None => IconCatalog::builtin(),
    };

    if args.dump_catalog {
        println!("{}", catalog.to_json_pretty()?);
        return Ok(());
    }

    let mut renderer = IconRenderer::new();
    if args.fallback_only {
        renderer = renderer.with_rasterizer(UnavailableRasterizer);
    }

    Generator::new(catalog, args.out_dir)
        .with_renderer(renderer)
        .run()?;
    Ok(())
}
