//! # Fixture Errors
//!
//! Error types for fixture loading and parsing.

use thiserror::Error;

/// Result type for fixture operations
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Errors raised while loading a problem-set fixture file
#[derive(Debug, Clone, Error)]
pub enum FixtureError {
    // ==================
    // Malformed Fixtures
    // ==================

    /// A declared problem has no query body
    #[error("Malformed fixture in '{set}': problem '{problem}' has an empty query body")]
    EmptyQuery { set: String, problem: String },

    /// A triple-quoted string was opened but never closed
    #[error("Malformed fixture in '{set}': unterminated string opened on line {line}")]
    UnterminatedString { set: String, line: usize },

    /// The same problem id was declared twice in one set
    #[error("Malformed fixture in '{set}': duplicate problem id '{problem}'")]
    DuplicateProblem { set: String, problem: String },

    /// An expected-output block appeared before any problem declaration
    #[error("Malformed fixture in '{set}': output block on line {line} has no preceding problem")]
    OrphanOutput { set: String, line: usize },

    // ==================
    // I/O
    // ==================

    /// The fixture file could not be read
    #[error("Failed to read fixture '{path}': {detail}")]
    Unreadable { path: String, detail: String },
}

impl FixtureError {
    /// True for the malformed-fixture family (as opposed to I/O failures)
    pub fn is_malformed(&self) -> bool {
        !matches!(self, FixtureError::Unreadable { .. })
    }
}
