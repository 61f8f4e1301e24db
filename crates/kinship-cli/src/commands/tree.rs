//! Tree command implementation.

use crate::cli::TreeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kinship_domain::PersonId;
use kinship_engine::FamilyGraph;
use kinship_store::SqliteStore;

/// Execute the tree command.
pub fn execute_tree(
    args: TreeArgs,
    store: &SqliteStore,
    engine: &FamilyGraph,
    formatter: &Formatter,
) -> Result<String> {
    let root = PersonId::from(args.root);
    let depth = args.depth.unwrap_or(engine.config().tree_max_depth);

    let tree = engine
        .build_family_tree_with_depth(store, &root, depth)?
        .ok_or_else(|| CliError::NotFound(format!("person {}", root)))?;

    formatter.format_tree(&tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use kinship_domain::{Person, RelationshipOptions, RelationshipType};

    #[test]
    fn test_tree_text_output() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        store.upsert_person(&Person::new("ada", "Ada", "Lovelace")).unwrap();
        store.upsert_person(&Person::new("byron", "Byron", "King")).unwrap();

        let engine = FamilyGraph::default_config();
        engine
            .add_relationship(
                &mut store,
                &PersonId::from("ada"),
                &PersonId::from("byron"),
                RelationshipType::Parent,
                &RelationshipOptions::default(),
            )
            .unwrap();

        let output = execute_tree(
            TreeArgs {
                root: "byron".to_string(),
                depth: None,
            },
            &store,
            &engine,
            &Formatter::new(OutputFormat::Table, false),
        )
        .unwrap();

        assert_eq!(output, "Byron King (byron)\n└── Parent: Ada Lovelace (ada)");
    }

    #[test]
    fn test_unknown_root() {
        let store = SqliteStore::new(":memory:").unwrap();
        let result = execute_tree(
            TreeArgs {
                root: "nobody".to_string(),
                depth: Some(2),
            },
            &store,
            &FamilyGraph::default_config(),
            &Formatter::new(OutputFormat::Table, false),
        );
        assert!(matches!(result, Err(CliError::NotFound(_))));
    }
}
