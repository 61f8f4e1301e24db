//! Ancestry search over stored `parent` edges
//!
//! Depth-first, sharing one visited set across the whole search. Bounded by
//! depth and an optional wall-clock deadline; cycles deeper than the depth
//! bound go undetected.

use kinship_domain::traits::{EdgeFilter, RelationshipStore};
use kinship_domain::{PersonId, RelationshipType};
use std::cell::Cell;
use std::collections::HashSet;
use std::time::Instant;
use thiserror::Error;

/// Bounds for a single ancestry search
#[derive(Debug)]
pub struct SearchLimits {
    /// Deepest recursion level explored
    pub max_depth: usize,

    /// Abort with [`AncestryError::TimedOut`] once this instant has passed
    pub deadline: Option<Instant>,

    depth_exceeded: Cell<bool>,
}

impl SearchLimits {
    /// Limits with a depth bound and an optional deadline
    pub fn new(max_depth: usize, deadline: Option<Instant>) -> Self {
        Self {
            max_depth,
            deadline,
            depth_exceeded: Cell::new(false),
        }
    }

    /// Whether any branch was cut off by the depth bound
    pub fn depth_exceeded(&self) -> bool {
        self.depth_exceeded.get()
    }

    fn check_deadline(&self) -> Result<(), AncestryError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(AncestryError::TimedOut),
            _ => Ok(()),
        }
    }
}

/// Reasons an ancestry search could not finish
#[derive(Error, Debug)]
pub enum AncestryError {
    /// Deadline passed before the search finished
    #[error("ancestry search timed out")]
    TimedOut,

    /// Store failed while loading edges
    #[error("store error during ancestry search: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Whether `ancestor` is reachable from `descendant` by following `parent` edges upward
///
/// Returns `Ok(false)` once `descendant` has been visited or `depth` exceeds
/// `limits.max_depth`. Edges `(p, descendant, parent)` make `p` a parent of
/// `descendant`; every such `p` is either the ancestor or searched next.
pub fn is_ancestor<S: RelationshipStore>(
    store: &S,
    ancestor: &PersonId,
    descendant: &PersonId,
    visited: &mut HashSet<PersonId>,
    depth: usize,
    limits: &SearchLimits,
) -> Result<bool, AncestryError> {
    if visited.contains(descendant) {
        return Ok(false);
    }
    if depth > limits.max_depth {
        limits.depth_exceeded.set(true);
        return Ok(false);
    }
    limits.check_deadline()?;

    visited.insert(descendant.clone());

    let filter = EdgeFilter::touching(descendant).with_type(RelationshipType::Parent);
    let edges = store
        .scan(&filter)
        .map_err(|e| AncestryError::Store(Box::new(e)))?;

    for edge in edges {
        if edge.relationship_type != RelationshipType::Parent || &edge.person_b_id != descendant {
            continue;
        }

        let parent = &edge.person_a_id;
        if parent == ancestor {
            return Ok(true);
        }
        if is_ancestor(store, ancestor, parent, visited, depth + 1, limits)? {
            return Ok(true);
        }
    }

    Ok(false)
}
