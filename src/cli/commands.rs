//! CLI command implementations
//!
//! Every command follows the same boot sequence: load config, load the
//! fixture corpus, then do one read-only pass. Nothing here mutates state
//! on disk.

use std::path::Path;

use crate::config::Config;
use crate::engine::ProcessEngine;
use crate::fixture::{FixtureLoader, ProblemSet};
use crate::harness::Runner;
use crate::observability::{log_event_with_fields, Event};
use crate::syntax;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parses arguments and dispatches to the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::List { config } => list(&config),
        Command::Check { config, set } => check(&config, set.as_deref()),
        Command::Show {
            config,
            set,
            problem,
        } => show(&config, &set, &problem),
        Command::Run {
            config,
            set,
            problem,
        } => run_problems(&config, set.as_deref(), problem.as_deref()),
    }
}

/// Loads the config and the selected problem sets
fn load_corpus(config_path: &Path, only_set: Option<&str>) -> CliResult<(Config, Vec<ProblemSet>)> {
    let config = Config::load(config_path)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("fixtures_dir", &config.fixtures_dir)],
    );

    if let Some(id) = only_set {
        if config.set(id).is_none() {
            return Err(CliError::unknown_target(format!("no such set '{}'", id)));
        }
    }

    let loader = FixtureLoader::new(&config.fixtures_dir);
    let mut sets = Vec::new();
    for set_config in &config.sets {
        if let Some(id) = only_set {
            if set_config.id != id {
                continue;
            }
        }
        let set = loader.load_set(&set_config.id, &set_config.file, set_config.backend)?;
        log_event_with_fields(
            Event::SetLoaded,
            &[
                ("set", set.id()),
                ("backend", set.backend.as_str()),
                ("problems", &set.len().to_string()),
            ],
        );
        sets.push(set);
    }

    Ok((config, sets))
}

/// `list`: print sets and problems with expected-output status
pub fn list(config_path: &Path) -> CliResult<()> {
    let (_, sets) = load_corpus(config_path, None)?;

    for set in &sets {
        println!("{} ({}, {} problems)", set.id(), set.backend, set.len());
        for problem in &set.problems {
            let status = match &problem.expected {
                Some(expected) if expected.truncated => "sample (truncated)",
                Some(_) => "sample",
                None => "no sample",
            };
            println!("  {:<12} {}", problem.id(), status);
        }
    }
    Ok(())
}

/// `check`: syntax-gate every loaded problem without touching an engine
pub fn check(config_path: &Path, only_set: Option<&str>) -> CliResult<()> {
    let (_, sets) = load_corpus(config_path, only_set)?;

    let mut failures = 0usize;
    for set in &sets {
        for problem in &set.problems {
            match syntax::check(set.backend, problem.query()) {
                Ok(()) => {}
                Err(err) => {
                    failures += 1;
                    println!("{}/{}: {}", set.id(), problem.id(), err);
                }
            }
        }
    }

    let total: usize = sets.iter().map(|s| s.len()).sum();
    println!("checked {} problem(s), {} failure(s)", total, failures);

    if failures > 0 {
        Err(CliError::check_failed(failures))
    } else {
        Ok(())
    }
}

/// `show`: print one problem's query and recorded sample
pub fn show(config_path: &Path, set_id: &str, problem_id: &str) -> CliResult<()> {
    let (_, sets) = load_corpus(config_path, Some(set_id))?;
    let set = &sets[0];

    let problem = set.problem(problem_id).ok_or_else(|| {
        CliError::unknown_target(format!("no problem '{}' in set '{}'", problem_id, set_id))
    })?;

    println!("-- {}/{} ({})", set.id(), problem.id(), set.backend);
    println!("{}", problem.query());
    match &problem.expected {
        Some(expected) => {
            println!(
                "\n-- recorded output{}:",
                if expected.truncated { " (truncated)" } else { "" }
            );
            for line in &expected.lines {
                println!("{}", line);
            }
        }
        None => println!("\n-- no recorded output"),
    }
    Ok(())
}

/// `run`: execute problems against their engines and print the report
pub fn run_problems(
    config_path: &Path,
    only_set: Option<&str>,
    only_problem: Option<&str>,
) -> CliResult<()> {
    let (config, sets) = load_corpus(config_path, only_set)?;

    let mut runner = Runner::new();
    for set in &sets {
        if runner.has_engine(set.backend) {
            continue;
        }
        if let Some(engine) = config.engines.for_backend(set.backend) {
            runner.register(Box::new(ProcessEngine::new(
                set.backend,
                engine.command.clone(),
                engine.args.clone(),
            )));
        }
    }

    log_event_with_fields(Event::RunStart, &[("sets", &sets.len().to_string())]);

    let report = match only_problem {
        Some(problem_id) => {
            // --problem requires --set, so exactly one set is loaded here
            let set = &sets[0];
            if set.problem(problem_id).is_none() {
                return Err(CliError::unknown_target(format!(
                    "no problem '{}' in set '{}'",
                    problem_id,
                    set.id()
                )));
            }
            runner.run_set(set, Some(problem_id))
        }
        None => runner.run_all(&sets),
    };

    let tally = report.tally();
    log_event_with_fields(
        Event::RunComplete,
        &[
            ("total", &tally.total().to_string()),
            ("passed", &tally.passed.to_string()),
            ("failed", &tally.failed.to_string()),
        ],
    );

    print!("{}", report.render());

    if report.has_hard_failures() {
        Err(CliError::run_failed(format!(
            "{} mismatched, {} failed to execute",
            tally.mismatched, tally.failed
        )))
    } else {
        Ok(())
    }
}
