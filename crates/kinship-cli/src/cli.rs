//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use kinship_domain::{RelationshipOptions, RelationshipType};
use std::path::PathBuf;

/// Kinship CLI - Record and explore family relationships.
#[derive(Debug, Parser)]
#[command(name = "kinship")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database path
    #[arg(short, long, global = true, env = "KINSHIP_DB")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage people
    Person(PersonArgs),

    /// Record that A is B's <TYPE>
    Relate(RelateArgs),

    /// Delete a relationship edge
    Unrelate(UnrelateArgs),

    /// Check whether a relationship would be accepted, without writing it
    Validate(ValidateArgs),

    /// List relationships
    List(ListArgs),

    /// Show the family tree around a person
    Tree(TreeArgs),

    /// Suggest likely relationships between two people
    Suggest(SuggestArgs),

    /// List relationship types and their inverses
    Types,

    /// Write a starter configuration file
    Init(InitArgs),
}

/// Arguments for person management.
#[derive(Debug, Parser)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub action: PersonAction,
}

/// Person management actions.
#[derive(Debug, Subcommand)]
pub enum PersonAction {
    /// Add or update a person
    Add {
        /// Person ID
        id: String,
        /// Given name
        first_name: String,
        /// Family name
        last_name: String,
        /// Profile photo reference
        #[arg(long)]
        photo: Option<String>,
    },

    /// List all people
    List,

    /// Show a person and their relationships
    Show {
        /// Person ID
        id: String,
    },

    /// Remove a person (their relationships are kept)
    Remove {
        /// Person ID
        id: String,
    },
}

/// Arguments for the relate command.
#[derive(Debug, Parser)]
pub struct RelateArgs {
    /// Person A (the source)
    pub person_a: String,

    /// Person B (the target)
    pub person_b: String,

    /// Relationship type, e.g. parent, spouse, great-grand-aunt
    pub relationship_type: RelationshipType,

    /// Qualifier such as "maternal" or "adoptive"
    #[arg(long)]
    pub subtype: Option<String>,

    /// Start date (ISO 8601)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (ISO 8601)
    #[arg(long)]
    pub end: Option<String>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Who recorded the relationship
    #[arg(long)]
    pub by: Option<String>,
}

impl RelateArgs {
    /// Optional edge metadata from the flags.
    pub fn options(&self) -> RelationshipOptions {
        RelationshipOptions {
            subtype: self.subtype.clone(),
            start_date: self.start.clone(),
            end_date: self.end.clone(),
            notes: self.notes.clone(),
            created_by: self.by.clone(),
        }
    }
}

/// Arguments for the unrelate command.
#[derive(Debug, Parser)]
pub struct UnrelateArgs {
    /// Relationship ID
    pub id: String,

    /// Also delete the counterpart inverse edge
    #[arg(long)]
    pub pair: bool,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Person A (the source)
    pub person_a: String,

    /// Person B (the target)
    pub person_b: String,

    /// Relationship type
    pub relationship_type: RelationshipType,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Only this person's relationships, stated from their side
    #[arg(short, long)]
    pub person: Option<String>,
}

/// Arguments for the tree command.
#[derive(Debug, Parser)]
pub struct TreeArgs {
    /// Root person ID
    pub root: String,

    /// Maximum depth (defaults to the configured depth)
    #[arg(short = 'n', long)]
    pub depth: Option<usize>,
}

/// Arguments for the suggest command.
#[derive(Debug, Parser)]
pub struct SuggestArgs {
    /// Person A
    pub person_a: String,

    /// Person B
    pub person_b: String,
}

/// Arguments for the init command.
#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Where to write the file (defaults to ~/.kinship/config.toml)
    pub path: Option<PathBuf>,

    /// Use the strict validation preset
    #[arg(long)]
    pub strict: bool,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relate_command() {
        let cli = Cli::parse_from([
            "kinship",
            "relate",
            "ada",
            "byron",
            "great-grand-aunt",
            "--subtype",
            "maternal",
        ]);
        match cli.command {
            Command::Relate(args) => {
                assert_eq!(args.relationship_type, RelationshipType::GreatGrandAunt);
                assert_eq!(args.options().subtype.as_deref(), Some("maternal"));
                assert!(args.options().notes.is_none());
            }
            other => panic!("Expected Relate command, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = Cli::try_parse_from(["kinship", "relate", "a", "b", "frenemy"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "kinship",
            "tree",
            "ada",
            "--depth",
            "2",
            "--format",
            "json",
            "--database",
            "/tmp/k.db",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/k.db")));
        match cli.command {
            Command::Tree(args) => assert_eq!(args.depth, Some(2)),
            other => panic!("Expected Tree command, got {:?}", other),
        }
    }

    #[test]
    fn test_person_subcommands() {
        let cli = Cli::parse_from(["kinship", "person", "add", "ada", "Ada", "Lovelace"]);
        assert!(matches!(
            cli.command,
            Command::Person(PersonArgs {
                action: PersonAction::Add { .. }
            })
        ));
    }

    #[test]
    fn test_init_command() {
        let cli = Cli::parse_from(["kinship", "init", "--strict"]);
        match cli.command {
            Command::Init(args) => {
                assert!(args.strict);
                assert!(!args.force);
                assert!(args.path.is_none());
            }
            other => panic!("Expected Init command, got {:?}", other),
        }
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Quiet.into();
        assert_eq!(format, crate::config::OutputFormat::Quiet);
    }
}
