//! Types command implementation.

use crate::error::Result;
use crate::output::Formatter;
use kinship_engine::FamilyGraph;

/// Execute the types command.
pub fn execute_types(engine: &FamilyGraph, formatter: &Formatter) -> Result<String> {
    formatter.format_types(engine.rules())
}
