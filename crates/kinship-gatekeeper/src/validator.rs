//! Relationship validation logic

use crate::ancestry::{is_ancestor, AncestryError, SearchLimits};
use crate::{GatekeeperError, ValidationConfig};
use kinship_domain::traits::{EdgeFilter, RelationshipStore};
use kinship_domain::{FamilyRelationship, PersonId, RelationshipId, RelationshipType, RuleTable};
use std::collections::HashSet;
use std::fmt;
use std::time::Instant;
use thiserror::Error;

/// Result of validating a proposed edge
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether the edge may be written
    pub valid: bool,

    /// Why it may not (set only when `valid` is false)
    pub error: Option<RejectionReason>,

    /// Non-fatal findings
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    fn accepted(warnings: Vec<ValidationWarning>) -> Self {
        Self {
            valid: true,
            error: None,
            warnings,
        }
    }

    fn rejected(reason: RejectionReason, warnings: Vec<ValidationWarning>) -> Self {
        Self {
            valid: false,
            error: Some(reason),
            warnings,
        }
    }

    /// Whether the edge may be written
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Warnings on success, the rejection reason on failure
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, RejectionReason> {
        match self.error {
            Some(reason) => Err(reason),
            None => Ok(self.warnings),
        }
    }
}

/// Reasons for rejection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Both endpoints are the same person
    #[error("A person cannot be related to themselves ({0})")]
    SelfRelation(PersonId),

    /// The pair already has an edge of this type
    #[error("{person_a} and {person_b} already have a {relationship_type} relationship ({existing_id})")]
    DuplicateRelation {
        /// Proposed source
        person_a: PersonId,
        /// Proposed target
        person_b: PersonId,
        /// Proposed type
        relationship_type: RelationshipType,
        /// The edge that already exists
        existing_id: RelationshipId,
    },

    /// The proposed parent is already a descendant of the proposed child
    #[error("{parent} cannot be a parent of {child}: {parent} is already a descendant of {child}")]
    CircularRelation {
        /// Proposed parent
        parent: PersonId,
        /// Proposed child
        child: PersonId,
    },

    /// The cycle check did not finish and the configuration fails closed
    #[error("Ancestry check could not complete: {0}")]
    CycleCheckIncomplete(String),
}

/// Non-fatal validation findings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// The cycle check ran past its timeout and was skipped
    CycleCheckTimedOut {
        /// Time spent before giving up
        elapsed_ms: u64,
    },

    /// The cycle check failed internally and was skipped
    CycleCheckFailed(String),

    /// Some ancestry branches were deeper than the search bound
    CycleCheckDepthExceeded {
        /// The bound that was hit
        max_depth: usize,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleCheckTimedOut { elapsed_ms } => {
                write!(f, "Ancestry check timed out after {}ms and was skipped", elapsed_ms)
            }
            Self::CycleCheckFailed(detail) => {
                write!(f, "Ancestry check failed and was skipped: {}", detail)
            }
            Self::CycleCheckDepthExceeded { max_depth } => {
                write!(f, "Ancestry check stopped at depth {}", max_depth)
            }
        }
    }
}

/// The Gatekeeper validates relationship edges before storage
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a proposed edge "`person_a` is the `relationship_type` of `person_b`"
    ///
    /// Checks run in order and stop at the first rejection:
    /// 1. self-relation
    /// 2. duplicate (same unordered pair, same type)
    /// 3. ancestry cycle, for `parent` edges and types whose auto-inverse is `parent`
    ///
    /// Store failures while checking duplicates are returned as errors. Store
    /// failures or timeouts inside the cycle check only produce a warning.
    pub fn validate<S: RelationshipStore>(
        &self,
        store: &S,
        rules: &RuleTable,
        person_a: &PersonId,
        person_b: &PersonId,
        relationship_type: RelationshipType,
    ) -> Result<ValidationResult, GatekeeperError> {
        let mut warnings = Vec::new();

        // 1. Self-relation
        if person_a == person_b {
            return Ok(ValidationResult::rejected(
                RejectionReason::SelfRelation(person_a.clone()),
                warnings,
            ));
        }

        // 2. Duplicate detection
        if self.config.check_duplicates {
            if let Some(existing) =
                self.find_duplicate(store, rules, person_a, person_b, relationship_type)?
            {
                return Ok(ValidationResult::rejected(
                    RejectionReason::DuplicateRelation {
                        person_a: person_a.clone(),
                        person_b: person_b.clone(),
                        relationship_type,
                        existing_id: existing.relationship_id,
                    },
                    warnings,
                ));
            }
        }

        // 3. Ancestry cycle, for the parent edge stored directly or as the auto-inverse
        let parent_edge = if relationship_type == RelationshipType::Parent {
            Some((person_a, person_b))
        } else if rules.auto_inverse(relationship_type) == Some(RelationshipType::Parent) {
            Some((person_b, person_a))
        } else {
            None
        };
        if let Some((parent, child)) = parent_edge {
            if let Some(reason) = self.check_cycle(store, parent, child, &mut warnings) {
                return Ok(ValidationResult::rejected(reason, warnings));
            }
        }

        Ok(ValidationResult::accepted(warnings))
    }

    /// Find an existing edge that makes the proposed one a duplicate
    fn find_duplicate<S: RelationshipStore>(
        &self,
        store: &S,
        rules: &RuleTable,
        person_a: &PersonId,
        person_b: &PersonId,
        relationship_type: RelationshipType,
    ) -> Result<Option<FamilyRelationship>, GatekeeperError> {
        let mut candidates = store
            .scan(&EdgeFilter::touching(person_a))
            .map_err(GatekeeperError::store)?;

        if self.config.exhaustive_duplicate_scan {
            let seen: HashSet<RelationshipId> =
                candidates.iter().map(|e| e.relationship_id).collect();
            let from_b = store
                .scan(&EdgeFilter::touching(person_b))
                .map_err(GatekeeperError::store)?;
            candidates.extend(
                from_b
                    .into_iter()
                    .filter(|e| !seen.contains(&e.relationship_id)),
            );
        }

        let inverse = rules.inverse(relationship_type);

        let duplicate = candidates.into_iter().find(|edge| {
            if !edge.connects(person_a, person_b) {
                return false;
            }
            if edge.relationship_type == relationship_type {
                return true;
            }
            // (b, a, inverse) states the same fact from the other side
            self.config.exhaustive_duplicate_scan
                && &edge.person_a_id == person_b
                && Some(edge.relationship_type) == inverse
        });

        Ok(duplicate)
    }

    /// Run the bounded ancestry search for a proposed `parent` edge
    ///
    /// Making `parent` a parent of `child` closes a loop when `parent` is
    /// already a descendant of `child`.
    fn check_cycle<S: RelationshipStore>(
        &self,
        store: &S,
        parent: &PersonId,
        child: &PersonId,
        warnings: &mut Vec<ValidationWarning>,
    ) -> Option<RejectionReason> {
        let started = Instant::now();
        let limits = SearchLimits::new(
            self.config.max_ancestry_depth,
            Some(started + self.config.cycle_check_timeout()),
        );

        let outcome = is_ancestor(store, child, parent, &mut HashSet::new(), 0, &limits);

        match outcome {
            Ok(true) => Some(RejectionReason::CircularRelation {
                parent: parent.clone(),
                child: child.clone(),
            }),
            Ok(false) => {
                if limits.depth_exceeded() {
                    tracing::debug!(
                        "Ancestry check for {} -> {} stopped at depth {}",
                        parent,
                        child,
                        self.config.max_ancestry_depth
                    );
                    warnings.push(ValidationWarning::CycleCheckDepthExceeded {
                        max_depth: self.config.max_ancestry_depth,
                    });
                }
                None
            }
            Err(AncestryError::TimedOut) => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                tracing::warn!(
                    "Ancestry check for {} -> {} timed out after {}ms",
                    parent,
                    child,
                    elapsed_ms
                );
                warnings.push(ValidationWarning::CycleCheckTimedOut { elapsed_ms });
                self.fail_closed(format!("timed out after {}ms", elapsed_ms))
            }
            Err(AncestryError::Store(e)) => {
                tracing::warn!("Ancestry check for {} -> {} failed: {}", parent, child, e);
                warnings.push(ValidationWarning::CycleCheckFailed(e.to_string()));
                self.fail_closed(e.to_string())
            }
        }
    }

    fn fail_closed(&self, detail: String) -> Option<RejectionReason> {
        if self.config.fail_closed_on_timeout {
            Some(RejectionReason::CycleCheckIncomplete(detail))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_domain::RelationshipOptions;
    use std::fmt;

    fn edge(a: &str, b: &str, t: RelationshipType) -> FamilyRelationship {
        FamilyRelationship::new(a.into(), b.into(), t, &RelationshipOptions::default(), 0)
    }

    fn id(s: &str) -> PersonId {
        PersonId::from(s)
    }

    // In-memory store for unit tests
    #[derive(Default)]
    struct MockStore {
        edges: Vec<FamilyRelationship>,
        fail_scans: bool,
    }

    #[derive(Debug)]
    struct MockError;

    impl fmt::Display for MockError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("mock store unavailable")
        }
    }

    impl std::error::Error for MockError {}

    impl RelationshipStore for MockStore {
        type Error = MockError;

        fn put(&mut self, edge: FamilyRelationship) -> Result<(), Self::Error> {
            self.edges.push(edge);
            Ok(())
        }

        fn delete_by_id(&mut self, id: RelationshipId) -> Result<bool, Self::Error> {
            let before = self.edges.len();
            self.edges.retain(|e| e.relationship_id != id);
            Ok(self.edges.len() != before)
        }

        fn scan(&self, filter: &EdgeFilter) -> Result<Vec<FamilyRelationship>, Self::Error> {
            if self.fail_scans {
                return Err(MockError);
            }
            Ok(self.edges.iter().filter(|e| filter.matches(e)).cloned().collect())
        }
    }

    fn store_with(edges: Vec<FamilyRelationship>) -> MockStore {
        MockStore {
            edges,
            fail_scans: false,
        }
    }

    #[test]
    fn test_valid_relationship() {
        let gatekeeper = Gatekeeper::default_config();
        let store = MockStore::default();
        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("a"), &id("b"), RelationshipType::Sibling)
            .unwrap();

        assert!(result.is_valid());
        assert!(result.error.is_none());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_self_relation() {
        let gatekeeper = Gatekeeper::default_config();
        let store = MockStore::default();
        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("a"), &id("a"), RelationshipType::Spouse)
            .unwrap();

        assert!(!result.is_valid());
        assert_eq!(result.error, Some(RejectionReason::SelfRelation(id("a"))));
    }

    #[test]
    fn test_duplicate_either_direction() {
        let gatekeeper = Gatekeeper::default_config();
        let existing = edge("b", "a", RelationshipType::Sibling);
        let existing_id = existing.relationship_id;
        let store = store_with(vec![existing]);

        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("a"), &id("b"), RelationshipType::Sibling)
            .unwrap();

        match result.error {
            Some(RejectionReason::DuplicateRelation { existing_id: found, .. }) => {
                assert_eq!(found, existing_id);
            }
            other => panic!("Expected DuplicateRelation, got {:?}", other),
        }
    }

    #[test]
    fn test_different_type_is_not_duplicate() {
        let gatekeeper = Gatekeeper::default_config();
        let store = store_with(vec![edge("a", "b", RelationshipType::Spouse)]);

        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("a"), &id("b"), RelationshipType::Partner)
            .unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_inverse_duplicate_only_in_exhaustive_mode() {
        // b is a's child; proposing a as b's parent restates it
        let store = store_with(vec![edge("b", "a", RelationshipType::Child)]);
        let rules = RuleTable::standard();

        let default = Gatekeeper::default_config()
            .validate(&store, &rules, &id("a"), &id("b"), RelationshipType::Parent)
            .unwrap();
        assert!(default.is_valid());

        let exhaustive = Gatekeeper::new(ValidationConfig {
            exhaustive_duplicate_scan: true,
            ..ValidationConfig::default()
        })
        .validate(&store, &rules, &id("a"), &id("b"), RelationshipType::Parent)
        .unwrap();
        assert!(matches!(
            exhaustive.error,
            Some(RejectionReason::DuplicateRelation { .. })
        ));
    }

    #[test]
    fn test_permissive_skips_duplicates() {
        let gatekeeper = Gatekeeper::new(ValidationConfig::permissive());
        let store = store_with(vec![edge("a", "b", RelationshipType::Cousin)]);

        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("a"), &id("b"), RelationshipType::Cousin)
            .unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_circular_parent_rejected() {
        let gatekeeper = Gatekeeper::default_config();
        let store = store_with(vec![
            edge("a", "b", RelationshipType::Parent),
            edge("b", "c", RelationshipType::Parent),
            edge("c", "d", RelationshipType::Parent),
        ]);

        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("d"), &id("a"), RelationshipType::Parent)
            .unwrap();

        assert_eq!(
            result.error,
            Some(RejectionReason::CircularRelation {
                parent: id("d"),
                child: id("a"),
            })
        );
    }

    #[test]
    fn test_cycle_check_only_for_parent() {
        let gatekeeper = Gatekeeper::default_config();
        let store = store_with(vec![edge("a", "b", RelationshipType::Parent)]);

        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("b"), &id("a"), RelationshipType::Grandparent)
            .unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_child_edge_checked_through_its_parent_inverse() {
        let gatekeeper = Gatekeeper::default_config();
        let store = store_with(vec![
            edge("a", "b", RelationshipType::Parent),
            edge("b", "c", RelationshipType::Parent),
        ]);

        // "a is c's child" implies "c is a's parent", closing a -> b -> c -> a
        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("a"), &id("c"), RelationshipType::Child)
            .unwrap();

        assert_eq!(
            result.error,
            Some(RejectionReason::CircularRelation {
                parent: id("c"),
                child: id("a"),
            })
        );

        let fine = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("c"), &id("a"), RelationshipType::Child)
            .unwrap();
        assert!(fine.is_valid());
    }

    #[test]
    fn test_timeout_passes_with_warning() {
        let gatekeeper = Gatekeeper::new(ValidationConfig {
            cycle_check_timeout_ms: 0,
            ..ValidationConfig::default()
        });
        let store = store_with(vec![
            edge("a", "b", RelationshipType::Parent),
            edge("b", "c", RelationshipType::Parent),
        ]);

        // c -> a is circular, but the check never gets to run
        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("c"), &id("a"), RelationshipType::Parent)
            .unwrap();

        assert!(result.is_valid(), "Timeout degrades to pass");
        assert!(matches!(
            result.warnings.as_slice(),
            [ValidationWarning::CycleCheckTimedOut { .. }]
        ));
    }

    #[test]
    fn test_timeout_fails_closed_when_configured() {
        let gatekeeper = Gatekeeper::new(ValidationConfig {
            cycle_check_timeout_ms: 0,
            fail_closed_on_timeout: true,
            ..ValidationConfig::default()
        });
        let store = MockStore::default();

        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("b"), &id("a"), RelationshipType::Parent)
            .unwrap();
        assert!(matches!(
            result.error,
            Some(RejectionReason::CycleCheckIncomplete(_))
        ));
    }

    #[test]
    fn test_store_failure_in_cycle_check_passes() {
        let gatekeeper = Gatekeeper::new(ValidationConfig::permissive());
        let store = MockStore {
            edges: Vec::new(),
            fail_scans: true,
        };

        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("a"), &id("b"), RelationshipType::Parent)
            .unwrap();
        assert!(result.is_valid());
        assert_eq!(
            result.warnings,
            vec![ValidationWarning::CycleCheckFailed("mock store unavailable".to_string())]
        );
    }

    #[test]
    fn test_store_failure_in_duplicate_check_errors() {
        let gatekeeper = Gatekeeper::default_config();
        let store = MockStore {
            edges: Vec::new(),
            fail_scans: true,
        };

        let result = gatekeeper.validate(
            &store,
            &RuleTable::standard(),
            &id("a"),
            &id("b"),
            RelationshipType::Sibling,
        );
        assert!(matches!(result, Err(GatekeeperError::Store(_))));
    }

    #[test]
    fn test_depth_warning() {
        let gatekeeper = Gatekeeper::new(ValidationConfig {
            max_ancestry_depth: 1,
            ..ValidationConfig::default()
        });
        let store = store_with(vec![
            edge("g1", "g2", RelationshipType::Parent),
            edge("g2", "g3", RelationshipType::Parent),
            edge("g3", "g4", RelationshipType::Parent),
        ]);

        // g4 -> g1 would close a loop of 4, beyond the bound of 1
        let result = gatekeeper
            .validate(&store, &RuleTable::standard(), &id("g4"), &id("g1"), RelationshipType::Parent)
            .unwrap();
        assert!(result.is_valid());
        assert_eq!(
            result.warnings,
            vec![ValidationWarning::CycleCheckDepthExceeded { max_depth: 1 }]
        );
    }

    #[test]
    fn test_into_result() {
        let ok = ValidationResult::accepted(vec![]);
        assert!(ok.into_result().is_ok());

        let err = ValidationResult::rejected(RejectionReason::SelfRelation(id("x")), vec![]);
        assert_eq!(err.into_result(), Err(RejectionReason::SelfRelation(id("x"))));
    }

    #[test]
    fn test_rejection_messages() {
        let msg = RejectionReason::CircularRelation {
            parent: id("d"),
            child: id("a"),
        }
        .to_string();
        assert!(msg.contains("already a descendant"));
    }
}
