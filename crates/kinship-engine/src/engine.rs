//! Family graph facade

use crate::{
    build_tree, EngineConfig, EngineError, RelationshipGraph, RelationshipWriter, Suggester,
    Suggestion, WriteOutcome,
};
use kinship_domain::traits::{EdgeFilter, PersonRegistry, RelationshipStore};
use kinship_domain::{
    FamilyRelationship, FamilyTreeNode, PersonId, RelationshipId, RelationshipOptions,
    RelationshipType, RuleTable,
};
use kinship_gatekeeper::{Gatekeeper, ValidationResult};
use std::collections::HashSet;

/// The public operations of the relationship engine
///
/// Holds only immutable configuration and the rule table. Every call reads
/// the store afresh; nothing is cached between calls.
pub struct FamilyGraph {
    config: EngineConfig,
    rules: RuleTable,
    gatekeeper: Gatekeeper,
}

impl FamilyGraph {
    /// Create an engine with the standard rule table
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rules(config, RuleTable::standard())
    }

    /// Create an engine with a custom rule table
    pub fn with_rules(config: EngineConfig, rules: RuleTable) -> Self {
        let gatekeeper = Gatekeeper::new(config.validation.clone());
        Self {
            config,
            rules,
            gatekeeper,
        }
    }

    /// Create an engine with default configuration
    pub fn default_config() -> Self {
        Self::new(EngineConfig::default())
    }

    /// The rule table in use
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// The configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate and persist "`a` is the `relationship_type` of `b`"
    ///
    /// Returns the id of the primary edge. The inverse edge, when the rule
    /// table calls for one, is written best-effort.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] when `verify_persons` is on and either person is unknown
    /// - [`EngineError::Rejected`] when validation fails
    /// - [`EngineError::Store`] when the store fails before the primary edge is written
    pub fn add_relationship<S>(
        &self,
        store: &mut S,
        a: &PersonId,
        b: &PersonId,
        relationship_type: RelationshipType,
        options: &RelationshipOptions,
    ) -> Result<RelationshipId, EngineError>
    where
        S: RelationshipStore + PersonRegistry,
    {
        self.add_relationship_detailed(store, a, b, relationship_type, options)
            .map(|outcome| outcome.primary_id)
    }

    /// Like [`add_relationship`](Self::add_relationship), reporting the inverse write too
    pub fn add_relationship_detailed<S>(
        &self,
        store: &mut S,
        a: &PersonId,
        b: &PersonId,
        relationship_type: RelationshipType,
        options: &RelationshipOptions,
    ) -> Result<WriteOutcome, EngineError>
    where
        S: RelationshipStore + PersonRegistry,
    {
        if self.config.verify_persons {
            for id in [a, b] {
                if store.get_person(id).map_err(EngineError::store)?.is_none() {
                    return Err(EngineError::NotFound(format!("person {}", id)));
                }
            }
        }

        RelationshipWriter::new(&self.gatekeeper, &self.rules).write(
            store,
            a,
            b,
            relationship_type,
            options,
        )
    }

    /// Delete one edge by id; its counterpart inverse edge is left in place
    pub fn remove_relationship<S: RelationshipStore>(
        &self,
        store: &mut S,
        id: RelationshipId,
    ) -> Result<(), EngineError> {
        RelationshipWriter::new(&self.gatekeeper, &self.rules).remove(store, id)
    }

    /// Delete an edge together with any counterpart inverse edge
    ///
    /// Returns how many edges were removed.
    pub fn remove_relationship_pair<S: RelationshipStore>(
        &self,
        store: &mut S,
        id: RelationshipId,
    ) -> Result<usize, EngineError> {
        RelationshipWriter::new(&self.gatekeeper, &self.rules).remove_pair(store, id)
    }

    /// Run the validation pipeline without writing anything
    pub fn validate_relationship<S: RelationshipStore>(
        &self,
        store: &S,
        a: &PersonId,
        b: &PersonId,
        relationship_type: RelationshipType,
    ) -> Result<ValidationResult, EngineError> {
        Ok(self
            .gatekeeper
            .validate(store, &self.rules, a, b, relationship_type)?)
    }

    /// Every relationship of `id`, stated from `id`'s side
    ///
    /// Edges stored with `id` as source are returned as stored. Edges stored
    /// with `id` as target are flipped into a view carrying the inverse type,
    /// unless a stored edge already states the same fact from `id`'s side.
    pub fn get_relationships_for_person<S: RelationshipStore>(
        &self,
        store: &S,
        id: &PersonId,
    ) -> Result<Vec<FamilyRelationship>, EngineError> {
        let edges = store
            .scan(&EdgeFilter::touching(id))
            .map_err(EngineError::store)?;

        let (outgoing, incoming): (Vec<_>, Vec<_>) =
            edges.into_iter().partition(|e| &e.person_a_id == id);

        let mut stated: HashSet<(PersonId, RelationshipType)> = outgoing
            .iter()
            .map(|e| (e.person_b_id.clone(), e.relationship_type))
            .collect();

        let mut result = outgoing;
        for edge in incoming {
            let view_type = self.rules.oriented_inverse(edge.relationship_type);
            if !stated.insert((edge.person_a_id.clone(), view_type)) {
                continue;
            }
            result.push(FamilyRelationship {
                person_a_id: edge.person_b_id,
                person_b_id: edge.person_a_id,
                relationship_type: view_type,
                ..edge
            });
        }

        Ok(result)
    }

    /// Every stored edge, optionally limited to edges with both endpoints in `scope`
    pub fn get_all_relationships<S: RelationshipStore>(
        &self,
        store: &S,
        scope: Option<&[PersonId]>,
    ) -> Result<Vec<FamilyRelationship>, EngineError> {
        let edges = store.scan(&EdgeFilter::all()).map_err(EngineError::store)?;
        Ok(match scope {
            None => edges,
            Some(ids) => {
                let ids: HashSet<&PersonId> = ids.iter().collect();
                edges
                    .into_iter()
                    .filter(|e| ids.contains(&e.person_a_id) && ids.contains(&e.person_b_id))
                    .collect()
            }
        })
    }

    /// Build the relationship graph over the people the registry knows
    ///
    /// With a `scope`, only those people are included.
    pub fn graph<S>(&self, store: &S, scope: Option<&[PersonId]>) -> Result<RelationshipGraph, EngineError>
    where
        S: RelationshipStore + PersonRegistry,
    {
        let persons = store.list_persons(scope).map_err(EngineError::store)?;
        let known: HashSet<PersonId> = persons.into_iter().map(|p| p.id).collect();
        let edges = store.scan(&EdgeFilter::all()).map_err(EngineError::store)?;
        Ok(RelationshipGraph::build(&edges, &self.rules, Some(&known)))
    }

    /// Family tree rooted at `root`, to the configured depth
    ///
    /// `Ok(None)` means `root` is not a known person.
    pub fn build_family_tree<S>(&self, store: &S, root: &PersonId) -> Result<Option<FamilyTreeNode>, EngineError>
    where
        S: RelationshipStore + PersonRegistry,
    {
        self.build_family_tree_with_depth(store, root, self.config.tree_max_depth)
    }

    /// Family tree rooted at `root`, to an explicit depth
    pub fn build_family_tree_with_depth<S>(
        &self,
        store: &S,
        root: &PersonId,
        max_depth: usize,
    ) -> Result<Option<FamilyTreeNode>, EngineError>
    where
        S: RelationshipStore + PersonRegistry,
    {
        let persons = store.list_persons(None).map_err(EngineError::store)?;
        if !persons.iter().any(|p| &p.id == root) {
            return Ok(None);
        }

        let known: HashSet<PersonId> = persons.iter().map(|p| p.id.clone()).collect();
        let edges = store.scan(&EdgeFilter::all()).map_err(EngineError::store)?;
        let graph = RelationshipGraph::build(&edges, &self.rules, Some(&known));

        Ok(build_tree(root, &graph, &persons, max_depth))
    }

    /// Likely relationships between `a` and `b`; empty when nothing matches
    pub fn suggest_relationships<S>(&self, store: &S, a: &PersonId, b: &PersonId) -> Vec<Suggestion>
    where
        S: RelationshipStore + PersonRegistry,
    {
        Suggester::new(&self.rules).suggest(store, store, a, b)
    }
}
