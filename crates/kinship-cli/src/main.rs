//! Kinship CLI - Command-line interface for the family relationship graph.

use clap::Parser;
use kinship_cli::config::OutputFormat;
use kinship_cli::{commands, Cli, Command, Config, Formatter};
use kinship_engine::FamilyGraph;
use kinship_store::SqliteStore;
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays parseable; `KINSHIP_LOG` wins over `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("KINSHIP_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run() -> kinship_cli::Result<()> {
    let cli = Cli::parse();

    // Init writes the config file, so it runs before any config is loaded
    if let Command::Init(args) = cli.command {
        let format = cli.format.map(Into::into).unwrap_or(OutputFormat::Table);
        let formatter = Formatter::new(format, !cli.no_color);
        println!("{}", commands::execute_init(args, &formatter)?);
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    let database = match cli.database {
        Some(path) => path,
        None => config.database_path()?,
    };
    if let Some(parent) = database.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    tracing::debug!("Opening database {}", database.display());
    let mut store = SqliteStore::new(&database)?;
    let engine = FamilyGraph::new(config.engine);

    commands::execute(cli.command, &mut store, &engine, &formatter)
}
