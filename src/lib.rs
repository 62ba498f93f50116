//! queryfix - a regression harness for coursework query fixtures
//!
//! Loads problem sets of SQL / XQuery / MongoDB answer queries, executes each
//! against its external engine, and compares output to recorded samples.

pub mod cli;
pub mod compare;
pub mod config;
pub mod engine;
pub mod fixture;
pub mod harness;
pub mod observability;
pub mod syntax;
