//! Harness subsystem for queryfix
//!
//! A single load, execute-each, compare, report pass over the fixture corpus.

mod report;
mod runner;

pub use report::{ProblemOutcome, ProblemReport, RunReport, Tally};
pub use runner::Runner;
