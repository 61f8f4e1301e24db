//! Relationship suggestions from shared connections
//!
//! A two-pattern heuristic. For every person X connected to both A and B it
//! looks at the role A and B each hold toward X:
//!
//! | A toward X | B toward X | Suggestion (A is B's ...) | Confidence |
//! |------------|------------|---------------------------|------------|
//! | parent     | parent     | sibling                   | 0.9        |
//! | parent     | child      | grandparent               | 0.8        |
//! | child      | parent     | grandchild                | 0.8        |
//!
//! Suggestions are advisory and never applied automatically. Store failures
//! are logged and produce an empty list.

use kinship_domain::traits::{EdgeFilter, PersonRegistry, RelationshipStore};
use kinship_domain::{PersonId, RelationshipType, RuleTable};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Confidence for the shared-parent pattern
pub const SIBLING_CONFIDENCE: f64 = 0.9;

/// Confidence for the parent/child pattern
pub const GRANDPARENT_CONFIDENCE: f64 = 0.8;

/// A candidate relationship: "A is B's `relationship_type`"
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// Proposed type from A toward B
    pub relationship_type: RelationshipType,

    /// 0.0 to 1.0
    pub confidence: f64,

    /// Human-readable rationale
    pub reason: String,
}

/// Shared-connection suggester
pub struct Suggester<'a> {
    rules: &'a RuleTable,
}

impl<'a> Suggester<'a> {
    /// Create a suggester over a rule table
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// Candidate relationships between `a` and `b`, highest confidence first
    pub fn suggest<S, R>(&self, store: &S, registry: &R, a: &PersonId, b: &PersonId) -> Vec<Suggestion>
    where
        S: RelationshipStore,
        R: PersonRegistry,
    {
        if a == b {
            return Vec::new();
        }

        let roles_a = match self.roles_toward(store, a) {
            Ok(roles) => roles,
            Err(e) => {
                tracing::warn!("Suggestions for {} / {} skipped: {}", a, b, e);
                return Vec::new();
            }
        };
        let roles_b = match self.roles_toward(store, b) {
            Ok(roles) => roles,
            Err(e) => {
                tracing::warn!("Suggestions for {} / {} skipped: {}", a, b, e);
                return Vec::new();
            }
        };

        let mut best: HashMap<RelationshipType, Suggestion> = HashMap::new();

        let shared = roles_a
            .iter()
            .filter(|(common, _)| *common != b)
            .filter_map(|(common, held_a)| Some((common, held_a, roles_b.get(common)?)));

        for (common, held_a, held_b) in shared {
            for (role_a, role_b) in held_a
                .iter()
                .flat_map(|ra| held_b.iter().map(move |rb| (ra, rb)))
            {
                let (relationship_type, confidence, pattern) = match (role_a, role_b) {
                    (RelationshipType::Parent, RelationshipType::Parent) => {
                        (RelationshipType::Sibling, SIBLING_CONFIDENCE, "both are parents of")
                    }
                    (RelationshipType::Parent, RelationshipType::Child) => (
                        RelationshipType::Grandparent,
                        GRANDPARENT_CONFIDENCE,
                        "one is a parent and the other a child of",
                    ),
                    (RelationshipType::Child, RelationshipType::Parent) => (
                        RelationshipType::Grandchild,
                        GRANDPARENT_CONFIDENCE,
                        "one is a child and the other a parent of",
                    ),
                    _ => continue,
                };

                let suggestion = Suggestion {
                    relationship_type,
                    confidence,
                    reason: format!("{} {}", pattern, display_name(registry, common)),
                };

                let outranked = best
                    .get(&relationship_type)
                    .is_some_and(|existing| existing.confidence >= confidence);
                if !outranked {
                    best.insert(relationship_type, suggestion);
                }
            }
        }

        let mut suggestions: Vec<Suggestion> = best.into_values().collect();
        suggestions.sort_by(|x, y| {
            y.confidence
                .total_cmp(&x.confidence)
                .then_with(|| x.relationship_type.as_str().cmp(y.relationship_type.as_str()))
        });

        tracing::debug!("{} suggestion(s) for {} / {}", suggestions.len(), a, b);
        suggestions
    }

    /// Every role `id` holds toward each directly connected person
    ///
    /// A stored `(id, x, t)` gives role `t`; a stored `(x, id, t)` gives the
    /// oriented inverse of `t`. A neighbour joined by several edges keeps all
    /// of its roles.
    fn roles_toward<S: RelationshipStore>(
        &self,
        store: &S,
        id: &PersonId,
    ) -> Result<BTreeMap<PersonId, BTreeSet<RelationshipType>>, S::Error> {
        let mut roles: BTreeMap<PersonId, BTreeSet<RelationshipType>> = BTreeMap::new();
        for edge in store.scan(&EdgeFilter::touching(id))? {
            if edge.person_a_id == edge.person_b_id {
                continue;
            }
            let (other, role) = if &edge.person_a_id == id {
                (edge.person_b_id, edge.relationship_type)
            } else {
                (
                    edge.person_a_id,
                    self.rules.oriented_inverse(edge.relationship_type),
                )
            };
            roles.entry(other).or_default().insert(role);
        }
        Ok(roles)
    }
}

fn display_name<R: PersonRegistry>(registry: &R, id: &PersonId) -> String {
    match registry.get_person(id) {
        Ok(Some(person)) if !person.full_name().is_empty() => person.full_name(),
        _ => id.to_string(),
    }
}
