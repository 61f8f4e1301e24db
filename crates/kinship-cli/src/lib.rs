//! Kinship CLI library.
//!
//! Command-line front end for the family relationship graph: argument
//! parsing, configuration, command execution, and output formatting over a
//! local SQLite database.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
