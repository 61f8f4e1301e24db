//! Command implementations.
//!
//! Each command returns its rendered output; [`execute`] prints it.

pub mod init;
pub mod list;
pub mod person;
pub mod relate;
pub mod suggest;
pub mod tree;
pub mod types;
pub mod unrelate;
pub mod validate;

pub use self::init::execute_init;
pub use self::list::execute_list;
pub use self::person::execute_person;
pub use self::relate::execute_relate;
pub use self::suggest::execute_suggest;
pub use self::tree::execute_tree;
pub use self::types::execute_types;
pub use self::unrelate::execute_unrelate;
pub use self::validate::execute_validate;

use crate::cli::Command;
use crate::error::Result;
use crate::output::Formatter;
use kinship_engine::FamilyGraph;
use kinship_store::SqliteStore;

/// Run a command against the store and print its output.
pub fn execute(
    command: Command,
    store: &mut SqliteStore,
    engine: &FamilyGraph,
    formatter: &Formatter,
) -> Result<()> {
    let output = match command {
        Command::Person(args) => execute_person(args, store, engine, formatter)?,
        Command::Relate(args) => execute_relate(args, store, engine, formatter)?,
        Command::Unrelate(args) => execute_unrelate(args, store, engine, formatter)?,
        Command::Validate(args) => execute_validate(args, store, engine, formatter)?,
        Command::List(args) => execute_list(args, store, engine, formatter)?,
        Command::Tree(args) => execute_tree(args, store, engine, formatter)?,
        Command::Suggest(args) => execute_suggest(args, store, engine, formatter)?,
        Command::Types => execute_types(engine, formatter)?,
        Command::Init(args) => execute_init(args, formatter)?,
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
