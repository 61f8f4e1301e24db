//! Kinship Gatekeeper
//!
//! Validates proposed relationship edges before they are written.
//!
//! The Gatekeeper provides:
//! - Self-relation rejection
//! - Duplicate detection (same unordered pair, same type)
//! - Ancestry cycle detection for `parent` edges, bounded by depth and a
//!   wall-clock timeout
//!
//! A slow or failing cycle check degrades to passing with a warning unless
//! [`ValidationConfig::fail_closed_on_timeout`] is set.
//!
//! # Examples
//!
//! ```no_run
//! use kinship_domain::{PersonId, RelationshipType, RuleTable};
//! use kinship_gatekeeper::{Gatekeeper, ValidationConfig};
//! use kinship_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! let rules = RuleTable::standard();
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//!
//! let result = gatekeeper
//!     .validate(&store, &rules, &PersonId::from("ada"), &PersonId::from("byron"), RelationshipType::Parent)
//!     .unwrap();
//! assert!(result.is_valid());
//! ```

#![warn(missing_docs)]

pub mod ancestry;
mod config;
mod error;
mod validator;

pub use ancestry::{is_ancestor, SearchLimits};
pub use config::ValidationConfig;
pub use error::GatekeeperError;
pub use validator::{Gatekeeper, RejectionReason, ValidationResult, ValidationWarning};
