//! Kinship Engine
//!
//! The family relationship graph engine: writes validated edges with their
//! auto-derived inverses, rebuilds a traversable graph from the stored edge
//! set, reconstructs nested family trees, and suggests likely relationships
//! between unconnected people.
//!
//! # Overview
//!
//! | Component | Responsibility |
//! |-----------|----------------|
//! | [`RelationshipWriter`] | Validate, persist the primary edge, persist the inverse (best effort) |
//! | [`RelationshipGraph`] | Undirected adjacency plus per-node oriented relationship types |
//! | [`TreeBuilder`] | Depth-bounded nested tree with branch-local cycle avoidance |
//! | [`Suggester`] | Two-pattern heuristic over shared connections |
//! | [`FamilyGraph`] | Facade exposing the public operations |
//!
//! Every operation is request-scoped. Nothing is cached between calls; each
//! read rebuilds the graph from the store.
//!
//! # Usage
//!
//! ```no_run
//! use kinship_domain::{Person, PersonId, RelationshipOptions, RelationshipType};
//! use kinship_engine::{EngineConfig, FamilyGraph};
//! use kinship_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("kinship.db")?;
//! store.upsert_person(&Person::new("ada", "Ada", "Lovelace"))?;
//! store.upsert_person(&Person::new("anne", "Anne", "King"))?;
//!
//! let engine = FamilyGraph::new(EngineConfig::default());
//! engine.add_relationship(
//!     &mut store,
//!     &PersonId::from("ada"),
//!     &PersonId::from("anne"),
//!     RelationshipType::Parent,
//!     &RelationshipOptions::default(),
//! )?;
//!
//! let tree = engine.build_family_tree(&store, &PersonId::from("ada"))?;
//! assert_eq!(tree.map(|t| t.children.len()), Some(1));
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! tree_max_depth = 5
//! verify_persons = true
//!
//! [validation]
//! max_ancestry_depth = 10
//! cycle_check_timeout_ms = 5000
//! check_duplicates = true
//! exhaustive_duplicate_scan = false
//! fail_closed_on_timeout = false
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
pub mod graph;
pub mod suggest;
pub mod tree;
mod writer;

pub use config::EngineConfig;
pub use engine::FamilyGraph;
pub use error::EngineError;
pub use graph::RelationshipGraph;
pub use suggest::{Suggester, Suggestion};
pub use tree::{build_tree, TreeBuilder};
pub use writer::{RelationshipWriter, WriteOutcome};

pub use kinship_gatekeeper::{RejectionReason, ValidationConfig, ValidationResult, ValidationWarning};
