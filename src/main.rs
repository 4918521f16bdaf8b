//! bookmarksync - Keep file dialog bookmarks in sync across desktops.
//!
//! Reads the sidebar places of one toolkit (GTK bookmarks, KDE user places,
//! Qt file dialog shortcuts) and writes them to the others:
//!   bookmarksync sync -f gtk            # GTK → KDE, Qt
//!   bookmarksync list kde               # Show KDE places
//!   bookmarksync paths                  # Show store locations

mod application;
mod cli;
mod domain;
mod infrastructure;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    format_backend_paths, format_places_json, format_places_plain, format_places_table,
    format_sync_report, OutputFormat, SyncService,
};
use cli::{Cli, Commands};
use domain::{AppConfig, BackendKind};
use infrastructure::{ensure_config_exists, load_config};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    let format = cli
        .command
        .output_format()
        .map_err(|e| domain::AppError::Config { message: e })?;

    if matches!(cli.command, Commands::InitConfig) {
        return cmd_init_config(cli.config.as_deref());
    }

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sync { from } => cmd_sync(&config, &from)?,
        Commands::List { backend, .. } => cmd_list(&config, &backend, format)?,
        Commands::Paths => cmd_paths(&config)?,
        Commands::InitConfig => {}
    }

    Ok(())
}

/// Sync from one backend to all others.
fn cmd_sync(config: &AppConfig, from: &str) -> domain::Result<()> {
    // Reject bad names before touching any store
    let source: BackendKind = from.parse()?;

    println!("Running sync from {source} backend");

    let service = SyncService::new(config)?;
    let report = service.sync_from(source.name())?;

    println!("{}", format_sync_report(&report));

    Ok(())
}

/// Print the places of one backend.
fn cmd_list(config: &AppConfig, backend: &str, format: OutputFormat) -> domain::Result<()> {
    let service = SyncService::new(config)?;
    let places = service.places(backend)?;

    let output = match format {
        OutputFormat::Table => format_places_table(&places),
        OutputFormat::Json => {
            format_places_json(&places).map_err(domain::AppError::json_serialize)?
        }
        OutputFormat::Plain => format_places_plain(&places),
    };

    println!("{output}");
    Ok(())
}

/// Show store paths command.
fn cmd_paths(config: &AppConfig) -> domain::Result<()> {
    let service = SyncService::new(config)?;

    println!("{}", "📂 Bookmark stores".bold());
    println!();
    println!("{}", format_backend_paths(service.backends()));

    Ok(())
}

/// Write the default configuration file.
fn cmd_init_config(path: Option<&std::path::Path>) -> domain::Result<()> {
    let (path, created) = ensure_config_exists(path)?;

    if created {
        println!("{} Wrote {}", "✓".green().bold(), path.display());
    } else {
        println!("Configuration already exists at {}", path.display());
    }

    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
