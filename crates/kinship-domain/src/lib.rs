//! Kinship Domain Layer
//!
//! This crate contains the core domain model for the family relationship graph.
//! Apart from `uuid` it has no external dependencies and defines the value
//! objects, the relationship rule table, and the trait interfaces that every
//! other layer depends upon.
//!
//! ## Key Concepts
//!
//! - **Person**: An externally owned identity; the engine only reads display fields
//! - **Relationship (edge)**: A directed assertion that person A is the `type` of person B
//! - **Rule table**: Per-type inverse, symmetry, and auto-inverse configuration
//! - **Family tree**: A derived, read-only nested view rebuilt on every read
//!
//! ## Architecture
//!
//! - Pure domain logic only
//! - Storage and person lookup live behind traits ([`traits::RelationshipStore`],
//!   [`traits::PersonRegistry`])
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod person;
pub mod relationship;
pub mod rules;
pub mod traits;
pub mod tree;

// Re-exports for convenience
pub use person::{Person, PersonId};
pub use relationship::{
    FamilyRelationship, RelationshipCategory, RelationshipId, RelationshipOptions,
    RelationshipType,
};
pub use rules::{RelationshipRule, RuleTable};
pub use tree::{FamilyTreeNode, TreeRelationship};

/// Current timestamp in seconds since Unix epoch
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
