//! The run loop: one pass over loaded problem sets.
//!
//! Problems are independent and read-only against the dataset, so the pass is
//! sequential with no coordination. There are no retries: query text is
//! static, and an engine failure now will be an engine failure on rerun.

use std::collections::HashMap;

use crate::compare::{compare, Comparison};
use crate::engine::{EngineAdapter, EngineError};
use crate::fixture::{BackendKind, Problem, ProblemSet};
use crate::observability::{log_event_with_fields, Event};

use super::report::{ProblemOutcome, RunReport};

/// Drives problems through their engines and collects a report
pub struct Runner {
    adapters: HashMap<BackendKind, Box<dyn EngineAdapter>>,
}

impl Runner {
    /// Creates a runner with no engines attached
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Attaches the engine for one backend, replacing any previous one
    pub fn register(&mut self, adapter: Box<dyn EngineAdapter>) {
        self.adapters.insert(adapter.kind(), adapter);
    }

    /// True when an engine is attached for the backend
    pub fn has_engine(&self, kind: BackendKind) -> bool {
        self.adapters.contains_key(&kind)
    }

    /// Runs every problem in every set, in order
    pub fn run_all(&self, sets: &[ProblemSet]) -> RunReport {
        let mut report = RunReport::new();
        for set in sets {
            self.run_set_into(set, None, &mut report);
        }
        report
    }

    /// Runs one set, optionally restricted to a single problem id
    pub fn run_set(&self, set: &ProblemSet, problem_id: Option<&str>) -> RunReport {
        let mut report = RunReport::new();
        self.run_set_into(set, problem_id, &mut report);
        report
    }

    fn run_set_into(&self, set: &ProblemSet, problem_id: Option<&str>, report: &mut RunReport) {
        for problem in &set.problems {
            if let Some(only) = problem_id {
                if problem.id != only {
                    continue;
                }
            }
            let outcome = self.run_problem(set, problem);
            report.record(set.id.clone(), problem.id.clone(), set.backend, outcome);
        }
    }

    /// Executes one problem and compares its output when a sample exists
    pub fn run_problem(&self, set: &ProblemSet, problem: &Problem) -> ProblemOutcome {
        let adapter = match self.adapters.get(&set.backend) {
            Some(adapter) => adapter,
            None => {
                return ProblemOutcome::ExecutionFailed(EngineError::Unavailable {
                    backend: set.backend.as_str().to_string(),
                })
            }
        };

        let actual = match adapter.execute(&problem.query) {
            Ok(actual) => actual,
            Err(err) => {
                log_event_with_fields(
                    Event::ProblemFailed,
                    &[
                        ("set", set.id()),
                        ("problem", problem.id()),
                        ("error", &err.to_string()),
                    ],
                );
                return ProblemOutcome::ExecutionFailed(err);
            }
        };

        log_event_with_fields(
            Event::ProblemExecuted,
            &[
                ("set", set.id()),
                ("problem", problem.id()),
                ("records", &actual.len().to_string()),
            ],
        );

        let expected = match &problem.expected {
            Some(expected) if !expected.is_empty() => expected,
            _ => return ProblemOutcome::NotChecked,
        };

        match compare(&actual, expected) {
            Comparison::Match => ProblemOutcome::Passed,
            Comparison::Mismatch(detail) => {
                let event = if detail.advisory {
                    Event::CompareAdvisory
                } else {
                    Event::CompareMismatch
                };
                log_event_with_fields(
                    event,
                    &[
                        ("set", set.id()),
                        ("problem", problem.id()),
                        ("detail", &detail.summary()),
                    ],
                );
                if detail.advisory {
                    ProblemOutcome::Advisory(detail)
                } else {
                    ProblemOutcome::Mismatched(detail)
                }
            }
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineResult, Record, ResultSet};
    use crate::fixture::ExpectedOutput;

    /// Test adapter that returns the same canned rows for every query
    struct StaticEngine {
        kind: BackendKind,
        lines: Vec<&'static str>,
    }

    impl EngineAdapter for StaticEngine {
        fn kind(&self) -> BackendKind {
            self.kind
        }

        fn execute(&self, _query: &str) -> EngineResult<ResultSet> {
            let records = self
                .lines
                .iter()
                .map(|l| Record::Row(vec![l.to_string()]))
                .collect();
            Ok(ResultSet::new(records, self.lines.join("\n")))
        }
    }

    fn one_problem_set(expected_block: Option<&str>) -> ProblemSet {
        let mut set = ProblemSet::new("ps1", BackendKind::Relational);
        let mut problem = Problem::new("problem7", "SELECT COUNT(*) FROM Movie;");
        problem.expected = expected_block.map(ExpectedOutput::from_block);
        set.problems.push(problem);
        set
    }

    #[test]
    fn test_missing_engine_is_execution_failure() {
        let runner = Runner::new();
        let set = one_problem_set(Some("541"));
        let report = runner.run_all(std::slice::from_ref(&set));
        assert!(report.has_hard_failures());
        assert!(matches!(
            report.entries[0].outcome,
            ProblemOutcome::ExecutionFailed(EngineError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_matching_output_passes() {
        let mut runner = Runner::new();
        runner.register(Box::new(StaticEngine {
            kind: BackendKind::Relational,
            lines: vec!["541"],
        }));
        let set = one_problem_set(Some("Output:\n541"));
        let report = runner.run_all(std::slice::from_ref(&set));
        assert!(matches!(report.entries[0].outcome, ProblemOutcome::Passed));
        assert!(!report.has_hard_failures());
    }

    #[test]
    fn test_no_sample_is_not_checked() {
        let mut runner = Runner::new();
        runner.register(Box::new(StaticEngine {
            kind: BackendKind::Relational,
            lines: vec!["whatever"],
        }));
        let set = one_problem_set(None);
        let report = runner.run_all(std::slice::from_ref(&set));
        assert!(matches!(
            report.entries[0].outcome,
            ProblemOutcome::NotChecked
        ));
    }

    #[test]
    fn test_run_set_filters_by_problem_id() {
        let mut runner = Runner::new();
        runner.register(Box::new(StaticEngine {
            kind: BackendKind::Relational,
            lines: vec!["1"],
        }));
        let mut set = one_problem_set(None);
        set.problems.push(Problem::new("problem8", "SELECT 1;"));

        let report = runner.run_set(&set, Some("problem8"));
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].problem_id, "problem8");
    }
}
