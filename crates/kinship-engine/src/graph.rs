//! Relationship graph builder
//!
//! Turns a flat edge list into an undirected adjacency structure plus the
//! relationship type each person holds toward each neighbor. The graph is a
//! pure function of its input and is rebuilt on every read.

use kinship_domain::{FamilyRelationship, PersonId, RelationshipType, RuleTable};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Adjacency plus oriented relationship types
///
/// `roles[x][y]` records "x is y's T". A stored edge `(a, b, t)` sets
/// `roles[a][b] = t` and `roles[b][a] = inverse(t)`, falling back to `t`
/// itself when the rule table has no inverse for it.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    adjacency: BTreeMap<PersonId, BTreeSet<PersonId>>,
    roles: HashMap<PersonId, HashMap<PersonId, RelationshipType>>,
    edge_count: usize,
}

impl RelationshipGraph {
    /// Build a graph from `edges`
    ///
    /// With a `scope`, edges with an endpoint outside it are skipped.
    /// Self-edges are skipped. When several edges join the same pair, the
    /// last one in iteration order decides the oriented types.
    pub fn build<'e, I>(edges: I, rules: &RuleTable, scope: Option<&HashSet<PersonId>>) -> Self
    where
        I: IntoIterator<Item = &'e FamilyRelationship>,
    {
        let mut graph = Self::default();

        for edge in edges {
            let a = &edge.person_a_id;
            let b = &edge.person_b_id;

            if a == b {
                continue;
            }
            if let Some(scope) = scope {
                if !scope.contains(a) || !scope.contains(b) {
                    continue;
                }
            }

            graph.adjacency.entry(a.clone()).or_default().insert(b.clone());
            graph.adjacency.entry(b.clone()).or_default().insert(a.clone());

            graph
                .roles
                .entry(a.clone())
                .or_default()
                .insert(b.clone(), edge.relationship_type);
            graph
                .roles
                .entry(b.clone())
                .or_default()
                .insert(a.clone(), rules.oriented_inverse(edge.relationship_type));

            graph.edge_count += 1;
        }

        tracing::debug!(
            "Built relationship graph: {} people, {} edges",
            graph.adjacency.len(),
            graph.edge_count
        );

        graph
    }

    /// Neighbors of `id`, in id order
    pub fn neighbors<'g>(&'g self, id: &PersonId) -> impl Iterator<Item = &'g PersonId> + 'g {
        self.adjacency.get(id).into_iter().flatten()
    }

    /// What `neighbor` is to `viewer` ("neighbor is viewer's T")
    pub fn oriented_type(&self, viewer: &PersonId, neighbor: &PersonId) -> Option<RelationshipType> {
        self.role_of(neighbor, viewer)
    }

    /// What `subject` is to `object` ("subject is object's T")
    pub fn role_of(&self, subject: &PersonId, object: &PersonId) -> Option<RelationshipType> {
        self.roles.get(subject)?.get(object).copied()
    }

    /// Whether `id` has at least one edge in the graph
    pub fn contains(&self, id: &PersonId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Number of people with at least one edge
    pub fn person_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges the graph was built from
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_domain::RelationshipOptions;

    fn edge(a: &str, b: &str, t: RelationshipType) -> FamilyRelationship {
        FamilyRelationship::new(a.into(), b.into(), t, &RelationshipOptions::default(), 0)
    }

    fn id(s: &str) -> PersonId {
        PersonId::from(s)
    }

    #[test]
    fn test_adjacency_is_undirected() {
        let edges = vec![edge("a", "b", RelationshipType::Parent)];
        let graph = RelationshipGraph::build(&edges, &RuleTable::standard(), None);

        assert_eq!(graph.neighbors(&id("a")).collect::<Vec<_>>(), vec![&id("b")]);
        assert_eq!(graph.neighbors(&id("b")).collect::<Vec<_>>(), vec![&id("a")]);
        assert_eq!(graph.neighbors(&id("z")).count(), 0);
        assert_eq!(graph.person_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_orientation_uses_inverse() {
        let edges = vec![edge("a", "b", RelationshipType::Parent)];
        let graph = RelationshipGraph::build(&edges, &RuleTable::standard(), None);

        // a is b's parent; b is a's child
        assert_eq!(graph.role_of(&id("a"), &id("b")), Some(RelationshipType::Parent));
        assert_eq!(graph.role_of(&id("b"), &id("a")), Some(RelationshipType::Child));
        assert_eq!(graph.oriented_type(&id("a"), &id("b")), Some(RelationshipType::Child));
        assert_eq!(graph.oriented_type(&id("b"), &id("a")), Some(RelationshipType::Parent));
    }

    #[test]
    fn test_display_only_inverse_still_orients() {
        let edges = vec![edge("a", "b", RelationshipType::Aunt)];
        let graph = RelationshipGraph::build(&edges, &RuleTable::standard(), None);
        assert_eq!(graph.oriented_type(&id("a"), &id("b")), Some(RelationshipType::Niece));
    }

    #[test]
    fn test_missing_inverse_falls_back_to_same_type() {
        let edges = vec![edge("a", "b", RelationshipType::BrotherInLaw)];
        let graph = RelationshipGraph::build(&edges, &RuleTable::standard(), None);
        assert_eq!(
            graph.oriented_type(&id("a"), &id("b")),
            Some(RelationshipType::BrotherInLaw)
        );
    }

    #[test]
    fn test_primary_and_inverse_agree() {
        let edges = vec![
            edge("a", "b", RelationshipType::Parent),
            edge("b", "a", RelationshipType::Child),
        ];
        let graph = RelationshipGraph::build(&edges, &RuleTable::standard(), None);

        assert_eq!(graph.neighbors(&id("a")).count(), 1);
        assert_eq!(graph.oriented_type(&id("a"), &id("b")), Some(RelationshipType::Child));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_scope_and_self_edges_skipped() {
        let edges = vec![
            edge("a", "b", RelationshipType::Sibling),
            edge("b", "outsider", RelationshipType::Sibling),
            edge("a", "a", RelationshipType::Sibling),
        ];
        let scope: HashSet<PersonId> = [id("a"), id("b")].into_iter().collect();
        let graph = RelationshipGraph::build(&edges, &RuleTable::standard(), Some(&scope));

        assert!(!graph.contains(&id("outsider")));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(&id("a")).collect::<Vec<_>>(), vec![&id("b")]);
    }
}
