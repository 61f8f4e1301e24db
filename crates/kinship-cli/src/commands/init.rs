//! Init command implementation.

use crate::cli::InitArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kinship_engine::EngineConfig;

/// Execute the init command: write a starter configuration file.
pub fn execute_init(args: InitArgs, formatter: &Formatter) -> Result<String> {
    let path = match args.path {
        Some(path) => path,
        None => Config::path()?,
    };

    if path.exists() && !args.force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let config = Config {
        engine: if args.strict {
            EngineConfig::strict()
        } else {
            EngineConfig::default()
        },
        ..Config::default()
    };
    config.save_to(&path)?;

    tracing::debug!("Wrote configuration to {}", path.display());
    Ok(formatter.success(&format!("Wrote configuration to {}", path.display())))
}
