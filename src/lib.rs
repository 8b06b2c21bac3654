//! ABAC Conditions - collection conditions for attribute-based access control
//!
//! A collection condition compares a runtime attribute value against a
//! reference collection fixed when the condition is built. Conditions are
//! immutable, cheap to evaluate concurrently, and persist losslessly as
//! `{"condition": "<Kind>", "value": [...]}` records.
//!
//! ```
//! use abac_conditions::CollectionCondition;
//! use serde_json::json;
//!
//! let condition = CollectionCondition::from_json(&json!({
//!     "condition": "AllIn",
//!     "value": ["read", "write", "delete"],
//! }))
//! .unwrap();
//!
//! assert!(condition.is_satisfied(&json!(["read", "write"])));
//! assert!(!condition.is_satisfied(&json!(["read", "admin"])));
//! assert!(!condition.is_satisfied(&json!("read")));
//! ```
//!
//! Python bindings via PyO3 are available behind the `python` feature.

pub mod condition;
pub mod config;
pub mod error;
pub mod host;

#[cfg(feature = "python")]
mod python;

pub use crate::condition::{CollectionCondition, ConditionCache, ConditionKind, RuntimeValue};
pub use crate::config::CacheConfig;
pub use crate::error::{ConditionCreationError, Result};
