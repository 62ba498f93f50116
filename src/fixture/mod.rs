//! Fixture subsystem for queryfix
//!
//! Loads coursework answer files into in-memory problem sets: named query
//! strings grouped by assignment, with optional recorded expected output.
//!
//! # Design Principles
//!
//! - Loaded once at startup, read-only thereafter
//! - Deterministic ordering (file order)
//! - Problem ids unique within a set
//! - Recorded outputs are documentation, not a verified contract

mod errors;
mod loader;
mod parser;
mod types;

pub use errors::{FixtureError, FixtureResult};
pub use loader::FixtureLoader;
pub use parser::FixtureParser;
pub use types::{normalize_line, BackendKind, ExpectedOutput, Problem, ProblemSet};
