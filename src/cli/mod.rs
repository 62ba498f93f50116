//! CLI module for queryfix
//!
//! Provides command-line interface for:
//! - list: show sets and problems
//! - check: load fixtures and run the syntax gate
//! - show: print one problem's query and sample
//! - run: execute against engines and report

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, list, run, run_problems, show};
pub use errors::{CliError, CliErrorCode, CliResult};
