//! Configuration for engine operations

use crate::EngineError;
use kinship_gatekeeper::ValidationConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the family graph engine
///
/// # Examples
///
/// ```
/// use kinship_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.tree_max_depth, 5);
///
/// let config = EngineConfig::from_toml_str("tree_max_depth = 3").unwrap();
/// assert_eq!(config.tree_max_depth, 3);
/// assert_eq!(config.validation.max_ancestry_depth, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Deepest level a family tree descends to
    /// Default: 5
    #[serde(default = "default_tree_max_depth")]
    pub tree_max_depth: usize,

    /// Reject edges whose endpoints the person registry does not know
    /// Default: true
    #[serde(default = "default_verify_persons")]
    pub verify_persons: bool,

    /// Validation rules applied before every write
    #[serde(default)]
    pub validation: ValidationConfig,
}

fn default_tree_max_depth() -> usize {
    5
}

fn default_verify_persons() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tree_max_depth: default_tree_max_depth(),
            verify_persons: default_verify_persons(),
            validation: ValidationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Strict validation (exhaustive duplicate scan, fail closed on timeout)
    pub fn strict() -> Self {
        Self {
            validation: ValidationConfig::strict(),
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML text; missing keys take defaults
    pub fn from_toml_str(text: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| EngineError::Config(format!("Invalid engine config: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with
    pub fn check(&self) -> Result<(), EngineError> {
        if self.validation.max_ancestry_depth == 0 {
            return Err(EngineError::Config(
                "validation.max_ancestry_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
