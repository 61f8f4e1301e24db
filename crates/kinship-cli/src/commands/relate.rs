//! Relate command implementation.

use crate::cli::RelateArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use kinship_domain::PersonId;
use kinship_engine::FamilyGraph;
use kinship_store::SqliteStore;

/// Execute the relate command.
pub fn execute_relate(
    args: RelateArgs,
    store: &mut SqliteStore,
    engine: &FamilyGraph,
    formatter: &Formatter,
) -> Result<String> {
    let person_a = PersonId::from(args.person_a.as_str());
    let person_b = PersonId::from(args.person_b.as_str());
    let options = args.options();

    let outcome = engine.add_relationship_detailed(
        store,
        &person_a,
        &person_b,
        args.relationship_type,
        &options,
    )?;

    tracing::info!(
        "Recorded {} is {} of {} ({})",
        person_a,
        args.relationship_type,
        person_b,
        outcome.primary_id
    );

    if formatter.format() == OutputFormat::Quiet {
        return Ok(outcome.primary_id.to_string());
    }

    let mut lines = vec![formatter.success(&format!(
        "{} is {} of {} ({})",
        person_a,
        args.relationship_type.label(),
        person_b,
        outcome.primary_id
    ))];

    if let Some(inverse_id) = outcome.inverse_id {
        lines.push(formatter.info(&format!("Inverse edge recorded ({})", inverse_id)));
    }
    if let Some(reason) = &outcome.inverse_error {
        lines.push(formatter.warning(&format!("Inverse edge could not be written: {}", reason)));
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use kinship_domain::{Person, RelationshipType};
    use kinship_engine::{EngineError, RejectionReason};

    fn args(a: &str, b: &str, t: RelationshipType) -> RelateArgs {
        RelateArgs {
            person_a: a.to_string(),
            person_b: b.to_string(),
            relationship_type: t,
            subtype: None,
            start: None,
            end: None,
            notes: None,
            by: None,
        }
    }

    fn store() -> SqliteStore {
        let mut store = SqliteStore::new(":memory:").unwrap();
        store.upsert_person(&Person::new("ada", "Ada", "Lovelace")).unwrap();
        store.upsert_person(&Person::new("byron", "Byron", "King")).unwrap();
        store
    }

    #[test]
    fn test_relate_reports_inverse() {
        let mut store = store();
        let output = execute_relate(
            args("ada", "byron", RelationshipType::Parent),
            &mut store,
            &FamilyGraph::default_config(),
            &Formatter::new(OutputFormat::Table, false),
        )
        .unwrap();

        assert!(output.contains("ada is Parent of byron"));
        assert!(output.contains("Inverse edge recorded"));
        assert_eq!(store.count_relationships().unwrap(), 2);
    }

    #[test]
    fn test_relate_rejection_surfaces() {
        let mut store = store();
        let result = execute_relate(
            args("ada", "ada", RelationshipType::Sibling),
            &mut store,
            &FamilyGraph::default_config(),
            &Formatter::new(OutputFormat::Quiet, false),
        );

        assert!(matches!(
            result,
            Err(CliError::Engine(EngineError::Rejected(RejectionReason::SelfRelation(_))))
        ));
    }
}
