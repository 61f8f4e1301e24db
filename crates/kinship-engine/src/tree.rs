//! Family tree reconstruction
//!
//! Walks the [`RelationshipGraph`] outward from a root, nesting each
//! relative's own subtree beneath them. Cycle avoidance is branch-local:
//! every recursive call gets its own copy of the visited set, so a person
//! reachable along two branches appears in both.

use crate::RelationshipGraph;
use kinship_domain::{FamilyTreeNode, Person, PersonId, RelationshipType, TreeRelationship};
use std::collections::{HashMap, HashSet};

/// Depth-bounded tree builder over a prebuilt graph
///
/// Each neighbor appears once per node with a single relationship type. When
/// a pair has several stored types (say `aunt` and `godparent`), the graph
/// keeps only the last edge it saw, so the tree shows only that type. Use the
/// edge listing to see them all.
pub struct TreeBuilder<'a> {
    graph: &'a RelationshipGraph,
    persons: HashMap<PersonId, &'a Person>,
    max_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder; `persons` supplies display fields for tree nodes
    pub fn new(graph: &'a RelationshipGraph, persons: &'a [Person], max_depth: usize) -> Self {
        let persons = persons.iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            graph,
            persons,
            max_depth,
        }
    }

    /// Tree rooted at `root`, or `None` when `root` is not a known person
    pub fn build(&self, root: &PersonId) -> Option<FamilyTreeNode> {
        self.build_node(root, HashSet::new(), 0)
    }

    fn build_node(
        &self,
        id: &PersonId,
        mut visited: HashSet<PersonId>,
        depth: usize,
    ) -> Option<FamilyTreeNode> {
        if depth > self.max_depth || visited.contains(id) {
            return None;
        }
        let person = self.persons.get(id)?;

        visited.insert(id.clone());
        let mut node = FamilyTreeNode::from_person(person);

        for neighbor in self.graph.neighbors(id) {
            if visited.contains(neighbor) {
                continue;
            }
            let Some(relationship_type) = self.graph.oriented_type(id, neighbor) else {
                continue;
            };
            let Some(subtree) = self.build_node(neighbor, visited.clone(), depth + 1) else {
                continue;
            };

            match relationship_type {
                RelationshipType::Spouse if node.spouse.is_none() => {
                    node.spouse = Some(Box::new(subtree.clone()));
                }
                RelationshipType::Child => node.children.push(subtree.clone()),
                RelationshipType::Parent => node.parents.push(subtree.clone()),
                RelationshipType::Sibling => node.siblings.push(subtree.clone()),
                _ => {}
            }

            node.relationships.push(TreeRelationship {
                person_id: neighbor.clone(),
                relationship_type,
                person: subtree,
            });
        }

        Some(node)
    }
}

/// Build the tree rooted at `root` in one call
///
/// One relationship type per relative; see [`TreeBuilder`].
pub fn build_tree(
    root: &PersonId,
    graph: &RelationshipGraph,
    persons: &[Person],
    max_depth: usize,
) -> Option<FamilyTreeNode> {
    let tree = TreeBuilder::new(graph, persons, max_depth).build(root);
    if let Some(tree) = &tree {
        tracing::debug!("Built family tree for {}: {} nodes", root, tree.size());
    }
    tree
}
