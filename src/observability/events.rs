//! Observable events during a harness run.
//!
//! Events are explicit and typed. One run is a single pass: load, execute
//! each problem, compare, report.

use std::fmt;

/// Observable events in queryfix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Harness run begins
    RunStart,
    /// Harness run complete, report emitted
    RunComplete,

    // Configuration & loading
    /// Configuration loaded
    ConfigLoaded,
    /// A problem set was loaded from its fixture file
    SetLoaded,

    // Execution
    /// A problem's query was executed against its engine
    ProblemExecuted,
    /// A problem's query failed to execute
    ProblemFailed,

    // Comparison
    /// Actual output differed from the recorded sample
    CompareMismatch,
    /// Mismatch against a truncated sample (advisory only)
    CompareAdvisory,
}

impl Event {
    /// Returns the event name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RunStart => "RUN_START",
            Event::RunComplete => "RUN_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SetLoaded => "SET_LOADED",
            Event::ProblemExecuted => "PROBLEM_EXECUTED",
            Event::ProblemFailed => "PROBLEM_FAILED",
            Event::CompareMismatch => "COMPARE_MISMATCH",
            Event::CompareAdvisory => "COMPARE_ADVISORY",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        for event in [
            Event::RunStart,
            Event::RunComplete,
            Event::ConfigLoaded,
            Event::SetLoaded,
            Event::ProblemExecuted,
            Event::ProblemFailed,
            Event::CompareMismatch,
            Event::CompareAdvisory,
        ] {
            let name = event.as_str();
            assert!(name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }
}
