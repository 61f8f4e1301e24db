//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the graph engine and its
//! collaborators. Implementations live in other crates (kinship-store).

use crate::{FamilyRelationship, Person, PersonId, RelationshipId, RelationshipType};

/// Durable storage for relationship edges
///
/// A generic filtered scan is all the engine needs; it always scans and
/// filters in memory, so no secondary indexes are assumed.
pub trait RelationshipStore {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a new edge
    fn put(&mut self, edge: FamilyRelationship) -> Result<(), Self::Error>;

    /// Hard-delete an edge; returns whether it existed
    fn delete_by_id(&mut self, id: RelationshipId) -> Result<bool, Self::Error>;

    /// All edges matching `filter`
    fn scan(&self, filter: &EdgeFilter) -> Result<Vec<FamilyRelationship>, Self::Error>;
}

/// Attribute filter for [`RelationshipStore::scan`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeFilter {
    /// Only edges with this person at either end
    pub touching: Option<PersonId>,

    /// Only edges of this type
    pub relationship_type: Option<RelationshipType>,

    /// Only edges flagged active
    pub active_only: bool,
}

impl EdgeFilter {
    /// Every edge in the store
    pub fn all() -> Self {
        Self::default()
    }

    /// Every edge touching `id`
    pub fn touching(id: &PersonId) -> Self {
        Self {
            touching: Some(id.clone()),
            ..Default::default()
        }
    }

    /// Narrow to a single type
    pub fn with_type(mut self, relationship_type: RelationshipType) -> Self {
        self.relationship_type = Some(relationship_type);
        self
    }

    /// Whether `edge` passes the filter
    pub fn matches(&self, edge: &FamilyRelationship) -> bool {
        if let Some(id) = &self.touching {
            if !edge.touches(id) {
                return false;
            }
        }
        if let Some(t) = self.relationship_type {
            if edge.relationship_type != t {
                return false;
            }
        }
        !self.active_only || edge.is_active
    }
}

/// Read-only access to the person registry
pub trait PersonRegistry {
    /// Error type for registry operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a person by id
    fn get_person(&self, id: &PersonId) -> Result<Option<Person>, Self::Error>;

    /// List people, optionally limited to the given ids
    fn list_persons(&self, scope: Option<&[PersonId]>) -> Result<Vec<Person>, Self::Error>;
}
