//! Error types for the spec system.
//!
//! These cover mistakes in authoring the tests themselves (an over-full
//! registry, an over-sized expectation tree, an unreadable fixture), never a
//! parsed value disagreeing with its expectation. Those are counted, not
//! raised.

use thiserror::Error;

/// Errors that can occur while setting up or loading test material.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A bounded collection was filled beyond its limit.
    #[error("{what} holds {count} entries, limit is {limit}")]
    Capacity {
        what: String,
        count: usize,
        limit: usize,
    },

    /// Error loading a fixture or configuration file.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },
}

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;

impl SpecError {
    pub fn capacity(what: impl Into<String>, count: usize, limit: usize) -> Self {
        SpecError::Capacity {
            what: what.into(),
            count,
            limit,
        }
    }
}
