//! Run report: per-problem outcomes and tallies.
//!
//! Advisory outcomes are reported but never asserted; only execution
//! failures and mismatches against complete samples count as hard failures.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::compare::MismatchDetail;
use crate::engine::EngineError;
use crate::fixture::BackendKind;

/// Outcome of running one problem
#[derive(Debug, Clone)]
pub enum ProblemOutcome {
    /// Executed and matched the recorded sample
    Passed,
    /// Executed; no recorded sample to compare against
    NotChecked,
    /// Mismatched a truncated sample (reported, not asserted)
    Advisory(MismatchDetail),
    /// Mismatched a complete sample
    Mismatched(MismatchDetail),
    /// The engine reported an error, surfaced verbatim
    ExecutionFailed(EngineError),
}

impl ProblemOutcome {
    /// Short status label for the text report
    pub fn label(&self) -> &'static str {
        match self {
            ProblemOutcome::Passed => "PASS",
            ProblemOutcome::NotChecked => "NOT CHECKED",
            ProblemOutcome::Advisory(_) => "ADVISORY",
            ProblemOutcome::Mismatched(_) => "MISMATCH",
            ProblemOutcome::ExecutionFailed(_) => "FAILED",
        }
    }

    /// True for outcomes that should fail the run
    pub fn is_hard_failure(&self) -> bool {
        matches!(
            self,
            ProblemOutcome::Mismatched(_) | ProblemOutcome::ExecutionFailed(_)
        )
    }
}

/// One problem's entry in the report
#[derive(Debug, Clone)]
pub struct ProblemReport {
    /// Owning problem set
    pub set_id: String,
    /// Problem identifier
    pub problem_id: String,
    /// Backend the problem ran against
    pub backend: BackendKind,
    /// What happened
    pub outcome: ProblemOutcome,
}

/// Tallies across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub not_checked: usize,
    pub advisory: usize,
    pub mismatched: usize,
    pub failed: usize,
}

impl Tally {
    fn count(&mut self, outcome: &ProblemOutcome) {
        match outcome {
            ProblemOutcome::Passed => self.passed += 1,
            ProblemOutcome::NotChecked => self.not_checked += 1,
            ProblemOutcome::Advisory(_) => self.advisory += 1,
            ProblemOutcome::Mismatched(_) => self.mismatched += 1,
            ProblemOutcome::ExecutionFailed(_) => self.failed += 1,
        }
    }

    /// Total problems counted
    pub fn total(&self) -> usize {
        self.passed + self.not_checked + self.advisory + self.mismatched + self.failed
    }
}

/// The full report for one harness run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Per-problem entries, in run order
    pub entries: Vec<ProblemReport>,
}

impl RunReport {
    /// Creates an empty report stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    /// Records one problem's outcome
    pub fn record(
        &mut self,
        set_id: impl Into<String>,
        problem_id: impl Into<String>,
        backend: BackendKind,
        outcome: ProblemOutcome,
    ) {
        self.entries.push(ProblemReport {
            set_id: set_id.into(),
            problem_id: problem_id.into(),
            backend,
            outcome,
        });
    }

    /// Tallies across all entries
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for entry in &self.entries {
            tally.count(&entry.outcome);
        }
        tally
    }

    /// True when any entry is an execution failure or a hard mismatch
    pub fn has_hard_failures(&self) -> bool {
        self.entries.iter().any(|e| e.outcome.is_hard_failure())
    }

    /// Renders the human-readable text report
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "queryfix run report ({})",
            self.started_at.format("%Y-%m-%dT%H:%M:%SZ")
        );

        let mut current_set: Option<&str> = None;
        for entry in &self.entries {
            if current_set != Some(entry.set_id.as_str()) {
                let _ = writeln!(out, "\n{} ({})", entry.set_id, entry.backend);
                current_set = Some(entry.set_id.as_str());
            }
            let _ = write!(out, "  {:<12} {}", entry.problem_id, entry.outcome.label());
            match &entry.outcome {
                ProblemOutcome::Advisory(detail) | ProblemOutcome::Mismatched(detail) => {
                    let _ = write!(out, "  {}", detail.summary());
                }
                ProblemOutcome::ExecutionFailed(err) => {
                    let _ = write!(out, "  {}", err);
                }
                _ => {}
            }
            out.push('\n');
        }

        let tally = self.tally();
        let _ = writeln!(
            out,
            "\ntotals: {} passed, {} advisory, {} mismatched, {} failed, {} unchecked ({} total)",
            tally.passed,
            tally.advisory,
            tally.mismatched,
            tally.failed,
            tally.not_checked,
            tally.total()
        );
        out
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
