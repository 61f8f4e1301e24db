//! Gatekeeper configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for relationship validation
///
/// # Examples
///
/// ```
/// use kinship_gatekeeper::ValidationConfig;
///
/// let config = ValidationConfig::default();
/// assert_eq!(config.max_ancestry_depth, 10);
/// assert_eq!(config.cycle_check_timeout_ms, 5000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Deepest ancestry chain the cycle check follows
    /// Default: 10 generations
    pub max_ancestry_depth: usize,

    /// Wall-clock budget for the cycle check (in milliseconds)
    /// Default: 5000
    pub cycle_check_timeout_ms: u64,

    /// Reject an edge when the same pair already has the same type
    /// Default: true
    pub check_duplicates: bool,

    /// Also scan the target's edges and treat a stored inverse edge as a duplicate
    /// Default: false
    pub exhaustive_duplicate_scan: bool,

    /// Reject instead of pass when the cycle check times out or fails
    /// Default: false
    pub fail_closed_on_timeout: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_ancestry_depth: 10,
            cycle_check_timeout_ms: 5000,
            check_duplicates: true,
            exhaustive_duplicate_scan: false,
            fail_closed_on_timeout: false,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (self-relations and cycles only)
    pub fn permissive() -> Self {
        Self {
            check_duplicates: false,
            ..Self::default()
        }
    }

    /// Create a strict configuration (exhaustive duplicates, fail closed)
    pub fn strict() -> Self {
        Self {
            max_ancestry_depth: 25,
            cycle_check_timeout_ms: 5000,
            check_duplicates: true,
            exhaustive_duplicate_scan: true,
            fail_closed_on_timeout: true,
        }
    }

    /// Cycle check timeout as a Duration
    pub fn cycle_check_timeout(&self) -> Duration {
        Duration::from_millis(self.cycle_check_timeout_ms)
    }
}
