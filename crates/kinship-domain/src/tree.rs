//! Family tree nodes - a derived, read-only view of the relationship graph
//!
//! Trees are rebuilt from the edge set on every read and never persisted.

use crate::{Person, PersonId, RelationshipType};

/// One person in a family tree, with their relatives nested beneath
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyTreeNode {
    /// Person id
    pub id: PersonId,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Optional profile photo reference
    pub profile_photo: Option<String>,

    /// First relative related to this node as `spouse`
    pub spouse: Option<Box<FamilyTreeNode>>,

    /// Relatives related to this node as `child`
    pub children: Vec<FamilyTreeNode>,

    /// Relatives related to this node as `parent`
    pub parents: Vec<FamilyTreeNode>,

    /// Relatives related to this node as `sibling`
    pub siblings: Vec<FamilyTreeNode>,

    /// Every relative, whatever the type
    pub relationships: Vec<TreeRelationship>,
}

/// A relative of a tree node
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRelationship {
    /// The relative's id
    pub person_id: PersonId,

    /// What the relative is to the enclosing node
    pub relationship_type: RelationshipType,

    /// The relative's own subtree
    pub person: FamilyTreeNode,
}

impl FamilyTreeNode {
    /// A node with display fields from `person` and no relatives
    pub fn from_person(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            profile_photo: person.profile_photo.clone(),
            spouse: None,
            children: Vec::new(),
            parents: Vec::new(),
            siblings: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// Whether the node has no relatives attached
    pub fn is_leaf(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Number of nodes in this subtree, counting repeats in separate branches
    pub fn size(&self) -> usize {
        1 + self
            .relationships
            .iter()
            .map(|r| r.person.size())
            .sum::<usize>()
    }

    /// Depth-first search for the first node with `id`
    pub fn find(&self, id: &PersonId) -> Option<&FamilyTreeNode> {
        if &self.id == id {
            return Some(self);
        }
        self.relationships
            .iter()
            .find_map(|r| r.person.find(id))
    }

    /// Every `(node, relative, type)` triple in the subtree, depth-first
    pub fn flatten(&self) -> Vec<(PersonId, PersonId, RelationshipType)> {
        let mut out = Vec::new();
        self.collect_edges(&mut out);
        out
    }

    fn collect_edges(&self, out: &mut Vec<(PersonId, PersonId, RelationshipType)>) {
        for rel in &self.relationships {
            out.push((self.id.clone(), rel.person_id.clone(), rel.relationship_type));
            rel.person.collect_edges(out);
        }
    }
}
