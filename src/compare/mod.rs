//! Advisory comparator for actual vs recorded output.
//!
//! Recorded samples are human-authored and sometimes elided, so comparison is
//! deliberately modest: per-line whitespace normalization, then line-sequence
//! equality. No reordering, numeric tolerance, or semantic equivalence. A
//! truncated sample only ever produces advisory mismatches, and only its
//! recorded lines are consulted.

use crate::engine::ResultSet;
use crate::fixture::ExpectedOutput;

/// Outcome of comparing one problem's actual output to its recorded sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// Actual output matches the sample
    Match,
    /// Actual output differs from the sample
    Mismatch(MismatchDetail),
}

/// What differed, for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchDetail {
    /// Recorded lines absent from the actual output
    pub missing: Vec<String>,
    /// Actual lines the sample does not record (empty for truncated samples)
    pub unexpected: Vec<String>,
    /// True when the sample is truncated: report, never assert
    pub advisory: bool,
}

impl MismatchDetail {
    /// One-line summary for log fields and reports
    pub fn summary(&self) -> String {
        format!(
            "{} recorded line(s) missing, {} unrecorded line(s) present",
            self.missing.len(),
            self.unexpected.len()
        )
    }
}

/// Compares a result set against a recorded sample
pub fn compare(actual: &ResultSet, expected: &ExpectedOutput) -> Comparison {
    let actual_lines = actual.render_lines();

    if expected.truncated {
        compare_truncated(&actual_lines, expected)
    } else {
        compare_exact(&actual_lines, expected)
    }
}

/// Full sample: line sequences must be identical
fn compare_exact(actual: &[String], expected: &ExpectedOutput) -> Comparison {
    if actual == expected.lines.as_slice() {
        return Comparison::Match;
    }

    let missing = expected
        .lines
        .iter()
        .filter(|l| !actual.contains(l))
        .cloned()
        .collect();
    let unexpected = actual
        .iter()
        .filter(|l| !expected.lines.contains(l))
        .cloned()
        .collect();

    Comparison::Mismatch(MismatchDetail {
        missing,
        unexpected,
        advisory: false,
    })
}

/// Elided sample: every recorded line must appear somewhere in the actual
/// output; nothing is inferred about the unrecorded remainder.
fn compare_truncated(actual: &[String], expected: &ExpectedOutput) -> Comparison {
    let missing: Vec<String> = expected
        .lines
        .iter()
        .filter(|l| !actual.contains(l))
        .cloned()
        .collect();

    if missing.is_empty() {
        Comparison::Match
    } else {
        Comparison::Mismatch(MismatchDetail {
            missing,
            unexpected: Vec::new(),
            advisory: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Record;

    fn rows(lines: &[&str]) -> ResultSet {
        let records = lines
            .iter()
            .map(|l| Record::Row(vec![l.to_string()]))
            .collect();
        ResultSet::new(records, lines.join("\n"))
    }

    #[test]
    fn test_exact_match() {
        let expected = ExpectedOutput::from_block("Output:\n541\n");
        assert_eq!(compare(&rows(&["541"]), &expected), Comparison::Match);
    }

    #[test]
    fn test_whitespace_insensitive_per_line() {
        let expected = ExpectedOutput::from_block("Green Book\t2019\n");
        let actual = rows(&["Green Book 2019"]);
        assert_eq!(compare(&actual, &expected), Comparison::Match);
    }

    #[test]
    fn test_order_sensitive_across_lines() {
        let expected = ExpectedOutput::from_block("a\nb\n");
        let actual = rows(&["b", "a"]);
        match compare(&actual, &expected) {
            Comparison::Mismatch(detail) => {
                assert!(!detail.advisory);
                // Both lines exist on both sides; only the order differs.
                assert!(detail.missing.is_empty());
                assert!(detail.unexpected.is_empty());
            }
            Comparison::Match => panic!("reordered output must not match"),
        }
    }

    #[test]
    fn test_mismatch_reports_missing_and_unexpected() {
        let expected = ExpectedOutput::from_block("541\n");
        let actual = rows(&["540"]);
        match compare(&actual, &expected) {
            Comparison::Mismatch(detail) => {
                assert_eq!(detail.missing, vec!["541"]);
                assert_eq!(detail.unexpected, vec!["540"]);
                assert!(!detail.advisory);
            }
            Comparison::Match => panic!("differing output must not match"),
        }
    }

    #[test]
    fn test_truncated_sample_subset_matches() {
        let expected = ExpectedOutput::from_block("first\n...\nlast\n");
        assert!(expected.truncated);
        let actual = rows(&["first", "middle-1", "middle-2", "last"]);
        assert_eq!(compare(&actual, &expected), Comparison::Match);
    }

    #[test]
    fn test_truncated_sample_mismatch_is_advisory() {
        let expected = ExpectedOutput::from_block("first\n...\n");
        let actual = rows(&["other"]);
        match compare(&actual, &expected) {
            Comparison::Mismatch(detail) => {
                assert!(detail.advisory);
                assert_eq!(detail.missing, vec!["first"]);
                assert!(detail.unexpected.is_empty());
            }
            Comparison::Match => panic!("missing recorded line must mismatch"),
        }
    }
}
