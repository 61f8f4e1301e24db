//! Suggest command implementation.

use crate::cli::SuggestArgs;
use crate::error::Result;
use crate::output::Formatter;
use kinship_domain::PersonId;
use kinship_engine::FamilyGraph;
use kinship_store::SqliteStore;

/// Execute the suggest command.
pub fn execute_suggest(
    args: SuggestArgs,
    store: &SqliteStore,
    engine: &FamilyGraph,
    formatter: &Formatter,
) -> Result<String> {
    let suggestions = engine.suggest_relationships(
        store,
        &PersonId::from(args.person_a),
        &PersonId::from(args.person_b),
    );
    formatter.format_suggestions(&suggestions)
}
