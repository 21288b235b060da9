//! Filter error types.
//!
//! The store is total: unknown names materialize empty dictionaries and
//! removals of missing entries are no-ops. Only explicit registration fails.

use thiserror::Error;

/// Errors raised by dictionary registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Dictionary \"{0}\" already exists")]
    DictionaryExists(String),

    #[error("Invalid symbol key {key:?}: expected exactly one character")]
    InvalidSymbol { key: String },
}
