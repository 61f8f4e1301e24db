//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;
use kinship_domain::PersonId;
use kinship_engine::FamilyGraph;
use kinship_store::SqliteStore;

/// Execute the list command.
pub fn execute_list(
    args: ListArgs,
    store: &SqliteStore,
    engine: &FamilyGraph,
    formatter: &Formatter,
) -> Result<String> {
    let edges = match args.person {
        Some(person) => engine.get_relationships_for_person(store, &PersonId::from(person))?,
        None => engine.get_all_relationships(store, None)?,
    };
    formatter.format_relationships(&edges)
}
