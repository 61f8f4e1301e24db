//! Person command implementation.

use crate::cli::{PersonAction, PersonArgs};
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kinship_domain::traits::PersonRegistry;
use kinship_domain::{Person, PersonId};
use kinship_engine::FamilyGraph;
use kinship_store::SqliteStore;

/// Execute a person subcommand.
pub fn execute_person(
    args: PersonArgs,
    store: &mut SqliteStore,
    engine: &FamilyGraph,
    formatter: &Formatter,
) -> Result<String> {
    match args.action {
        PersonAction::Add {
            id,
            first_name,
            last_name,
            photo,
        } => {
            if id.trim().is_empty() {
                return Err(CliError::InvalidInput("Person ID cannot be empty".to_string()));
            }

            let mut person = Person::new(id.trim(), first_name, last_name);
            if let Some(photo) = photo {
                person = person.with_photo(photo);
            }
            store.upsert_person(&person)?;
            tracing::info!("Saved person {}", person.id);

            Ok(match formatter.format() {
                OutputFormat::Quiet => person.id.to_string(),
                _ => formatter.success(&format!("Saved {} ({})", person.full_name(), person.id)),
            })
        }

        PersonAction::List => {
            let persons = store.list_persons(None)?;
            formatter.format_persons(&persons)
        }

        PersonAction::Show { id } => {
            let id = PersonId::from(id);
            let person = store
                .get_person(&id)?
                .ok_or_else(|| CliError::NotFound(format!("person {}", id)))?;
            let edges = engine.get_relationships_for_person(&*store, &id)?;
            formatter.format_person(&person, &edges)
        }

        PersonAction::Remove { id } => {
            let id = PersonId::from(id);
            store.remove_person(&id)?;
            tracing::info!("Removed person {}", id);

            Ok(match formatter.format() {
                OutputFormat::Quiet => String::new(),
                _ => formatter.success(&format!("Removed person {}", id)),
            })
        }
    }
}
