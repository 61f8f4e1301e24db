//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::output::Formatter;
use kinship_domain::PersonId;
use kinship_engine::FamilyGraph;
use kinship_store::SqliteStore;

/// Execute the validate command.
pub fn execute_validate(
    args: ValidateArgs,
    store: &SqliteStore,
    engine: &FamilyGraph,
    formatter: &Formatter,
) -> Result<String> {
    let result = engine.validate_relationship(
        store,
        &PersonId::from(args.person_a),
        &PersonId::from(args.person_b),
        args.relationship_type,
    )?;
    formatter.format_validation(&result)
}
