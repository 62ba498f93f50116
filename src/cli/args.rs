//! CLI argument definitions using clap
//!
//! Commands:
//! - queryfix list --config <path>
//! - queryfix check --config <path> [--set <id>]
//! - queryfix show --config <path> --set <id> --problem <id>
//! - queryfix run --config <path> [--set <id>] [--problem <id>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// queryfix - a regression harness for coursework query fixtures
#[derive(Parser, Debug)]
#[command(name = "queryfix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List problem sets and problems
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./queryfix.json")]
        config: PathBuf,
    },

    /// Load all fixtures and run the syntax gate; no engines contacted
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./queryfix.json")]
        config: PathBuf,

        /// Restrict to one problem set
        #[arg(long)]
        set: Option<String>,
    },

    /// Print one problem's query text and recorded expected output
    Show {
        /// Path to configuration file
        #[arg(long, default_value = "./queryfix.json")]
        config: PathBuf,

        /// Problem set id
        #[arg(long)]
        set: String,

        /// Problem id within the set
        #[arg(long)]
        problem: String,
    },

    /// Execute problems against their engines and report outcomes
    Run {
        /// Path to configuration file
        #[arg(long, default_value = "./queryfix.json")]
        config: PathBuf,

        /// Restrict to one problem set
        #[arg(long)]
        set: Option<String>,

        /// Restrict to one problem (requires --set)
        #[arg(long, requires = "set")]
        problem: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
