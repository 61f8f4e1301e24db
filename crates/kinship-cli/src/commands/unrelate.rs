//! Unrelate command implementation.

use crate::cli::UnrelateArgs;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kinship_domain::RelationshipId;
use kinship_engine::FamilyGraph;
use kinship_store::SqliteStore;

/// Execute the unrelate command.
pub fn execute_unrelate(
    args: UnrelateArgs,
    store: &mut SqliteStore,
    engine: &FamilyGraph,
    formatter: &Formatter,
) -> Result<String> {
    let id = RelationshipId::from_string(&args.id)
        .map_err(|e| CliError::InvalidInput(format!("Invalid ID '{}': {}", args.id, e)))?;

    let removed = if args.pair {
        engine.remove_relationship_pair(store, id)?
    } else {
        engine.remove_relationship(store, id)?;
        1
    };
    tracing::info!("Removed {} edge(s) for relationship {}", removed, id);

    Ok(match formatter.format() {
        OutputFormat::Quiet => removed.to_string(),
        _ => formatter.success(&format!("Removed {} relationship edge(s)", removed)),
    })
}
