//! Relationship writer - validated primary write plus best-effort inverse

use crate::EngineError;
use kinship_domain::traits::{EdgeFilter, RelationshipStore};
use kinship_domain::{
    current_timestamp, FamilyRelationship, PersonId, RelationshipId, RelationshipOptions,
    RelationshipType, RuleTable,
};
use kinship_gatekeeper::Gatekeeper;

/// What a write actually persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// The primary edge
    pub primary_id: RelationshipId,

    /// The auto-created inverse edge, if one was written
    pub inverse_id: Option<RelationshipId>,

    /// Why the inverse write failed, if it did
    pub inverse_error: Option<String>,
}

impl WriteOutcome {
    /// Whether an inverse was due but could not be written
    pub fn is_one_sided(&self) -> bool {
        self.inverse_error.is_some()
    }
}

/// Orchestrates validation and the primary/inverse edge writes
///
/// The two writes are independent. A failed inverse write is logged and
/// swallowed; the primary edge stays and the pair is left one-sided.
pub struct RelationshipWriter<'a> {
    gatekeeper: &'a Gatekeeper,
    rules: &'a RuleTable,
}

impl<'a> RelationshipWriter<'a> {
    /// Create a writer over a gatekeeper and rule table
    pub fn new(gatekeeper: &'a Gatekeeper, rules: &'a RuleTable) -> Self {
        Self { gatekeeper, rules }
    }

    /// Validate and persist "`source` is the `relationship_type` of `target`"
    ///
    /// # Errors
    ///
    /// - [`EngineError::Rejected`] when validation fails (nothing written)
    /// - [`EngineError::Store`] when validation or the primary write fails
    pub fn write<S: RelationshipStore>(
        &self,
        store: &mut S,
        source: &PersonId,
        target: &PersonId,
        relationship_type: RelationshipType,
        options: &RelationshipOptions,
    ) -> Result<WriteOutcome, EngineError> {
        let validation =
            self.gatekeeper
                .validate(&*store, self.rules, source, target, relationship_type)?;
        for warning in &validation.warnings {
            tracing::debug!("Validation warning for {} -> {}: {:?}", source, target, warning);
        }
        validation.into_result()?;

        let now = current_timestamp();

        let primary = FamilyRelationship::new(
            source.clone(),
            target.clone(),
            relationship_type,
            options,
            now,
        );
        let primary_id = primary.relationship_id;
        store.put(primary).map_err(EngineError::store)?;

        tracing::debug!(
            "Stored {} is {} of {} ({})",
            source,
            relationship_type,
            target,
            primary_id
        );

        let mut outcome = WriteOutcome {
            primary_id,
            inverse_id: None,
            inverse_error: None,
        };

        if let Some(inverse_type) = self.rules.auto_inverse(relationship_type) {
            let inverse =
                FamilyRelationship::new(target.clone(), source.clone(), inverse_type, options, now);
            let inverse_id = inverse.relationship_id;

            match store.put(inverse) {
                Ok(()) => {
                    tracing::debug!(
                        "Stored inverse {} is {} of {} ({})",
                        target,
                        inverse_type,
                        source,
                        inverse_id
                    );
                    outcome.inverse_id = Some(inverse_id);
                }
                Err(e) => {
                    tracing::warn!(
                        "Inverse edge {} -> {} ({}) not written, primary {} kept: {}",
                        target,
                        source,
                        inverse_type,
                        primary_id,
                        e
                    );
                    outcome.inverse_error = Some(e.to_string());
                }
            }
        }

        Ok(outcome)
    }

    /// Hard-delete a single edge; the counterpart inverse edge is left alone
    pub fn remove<S: RelationshipStore>(
        &self,
        store: &mut S,
        id: RelationshipId,
    ) -> Result<(), EngineError> {
        if store.delete_by_id(id).map_err(EngineError::store)? {
            tracing::debug!("Removed relationship {}", id);
            Ok(())
        } else {
            Err(EngineError::NotFound(format!("relationship {}", id)))
        }
    }

    /// Delete an edge and every stored edge stating the same fact from the other side
    ///
    /// Returns the number of edges removed.
    pub fn remove_pair<S: RelationshipStore>(
        &self,
        store: &mut S,
        id: RelationshipId,
    ) -> Result<usize, EngineError> {
        let edges = store.scan(&EdgeFilter::all()).map_err(EngineError::store)?;
        let edge = edges
            .iter()
            .find(|e| e.relationship_id == id)
            .ok_or_else(|| EngineError::NotFound(format!("relationship {}", id)))?;

        let counterpart_type = self.rules.oriented_inverse(edge.relationship_type);
        let counterparts: Vec<RelationshipId> = edges
            .iter()
            .filter(|e| {
                e.relationship_id != id
                    && e.person_a_id == edge.person_b_id
                    && e.person_b_id == edge.person_a_id
                    && e.relationship_type == counterpart_type
            })
            .map(|e| e.relationship_id)
            .collect();

        let mut removed = 0;
        for target in std::iter::once(id).chain(counterparts) {
            if store.delete_by_id(target).map_err(EngineError::store)? {
                removed += 1;
            }
        }

        tracing::debug!("Removed {} edge(s) for relationship {}", removed, id);
        Ok(removed)
    }
}
