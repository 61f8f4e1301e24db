//! Error types for engine operations

use kinship_gatekeeper::{GatekeeperError, RejectionReason};
use thiserror::Error;

/// Errors that can occur during engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Validation rejected the edge; nothing was written
    #[error("{0}")]
    Rejected(#[from] RejectionReason),

    /// Unknown person or relationship id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage layer error, passed through unchanged
    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Wrap a store or registry error
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }

    /// The rejection reason, if this is a validation failure
    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<GatekeeperError> for EngineError {
    fn from(err: GatekeeperError) -> Self {
        match err {
            GatekeeperError::Store(inner) => Self::Store(inner),
            GatekeeperError::Config(msg) => Self::Config(msg),
        }
    }
}
