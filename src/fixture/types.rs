//! Core fixture types: backends, problems, and problem sets.
//!
//! A problem set is an ordered, read-only collection of named queries loaded
//! once at startup. Nothing here mutates after load.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The external engine family a problem set targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// A SQL RDBMS (tabular rows)
    Relational,
    /// An XQuery-capable XML database (node sequences)
    Xml,
    /// A document store with a find/aggregate surface (documents)
    Document,
}

impl BackendKind {
    /// Returns the lowercase name used in config files and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Relational => "relational",
            BackendKind::Xml => "xml",
            BackendKind::Document => "document",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded sample of expected output for a problem
///
/// Samples are human-authored documentation, not a verified contract. Blocks
/// the original author elided with `...` are marked truncated, and any
/// comparison against them is advisory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedOutput {
    /// Normalized output lines (trimmed, interior whitespace collapsed)
    pub lines: Vec<String>,
    /// Whether the recorded block was elided by the author
    pub truncated: bool,
}

impl ExpectedOutput {
    /// Builds an expected output from raw block text.
    ///
    /// Strips a leading `Output:` label, drops blank lines, collapses interior
    /// whitespace per line, and flags the block truncated when an ellipsis
    /// line is present.
    pub fn from_block(raw: &str) -> Self {
        let mut lines = Vec::new();
        let mut truncated = false;

        for line in raw.lines() {
            let norm = normalize_line(line);
            if norm.is_empty() {
                continue;
            }
            if norm.eq_ignore_ascii_case("output:") {
                continue;
            }
            if norm == "..." {
                truncated = true;
                continue;
            }
            lines.push(norm);
        }

        ExpectedOutput { lines, truncated }
    }

    /// True when the sample carries no usable lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Collapses a line's interior whitespace runs to single spaces and trims it
pub fn normalize_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One named query with optional recorded output
#[derive(Debug, Clone)]
pub struct Problem {
    /// Problem identifier, e.g. "problem7" or "query6"
    pub id: String,
    /// Opaque query text in the backend's language
    pub query: String,
    /// Recorded sample output, if the author supplied one
    pub expected: Option<ExpectedOutput>,
}

impl Problem {
    /// Creates a problem with no expected output
    pub fn new(id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            query: query.into(),
            expected: None,
        }
    }

    /// Returns the problem id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the query text
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// An ordered set of problems for one assignment, all against one backend
#[derive(Debug, Clone)]
pub struct ProblemSet {
    /// Set identifier, e.g. "ps1"
    pub id: String,
    /// Backend the set's queries are written for
    pub backend: BackendKind,
    /// Problems in file order
    pub problems: Vec<Problem>,
}

impl ProblemSet {
    /// Creates an empty problem set
    pub fn new(id: impl Into<String>, backend: BackendKind) -> Self {
        Self {
            id: id.into(),
            backend,
            problems: Vec::new(),
        }
    }

    /// Returns the set id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of problems in the set
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// True when the set holds no problems
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Looks up a problem by id
    pub fn problem(&self, id: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_output_strips_label_and_blanks() {
        let block = "\n    Output:\n    541\n\n";
        let expected = ExpectedOutput::from_block(block);
        assert_eq!(expected.lines, vec!["541"]);
        assert!(!expected.truncated);
    }

    #[test]
    fn test_expected_output_marks_ellipsis_truncated() {
        let block = "Output:\nAlpha\t1\n...\nOmega\t9\n";
        let expected = ExpectedOutput::from_block(block);
        assert!(expected.truncated);
        assert_eq!(expected.lines, vec!["Alpha 1", "Omega 9"]);
    }

    #[test]
    fn test_normalize_line_collapses_tabs_and_spaces() {
        assert_eq!(normalize_line("  a\t\tb   c "), "a b c");
    }

    #[test]
    fn test_problem_set_lookup() {
        let mut set = ProblemSet::new("ps1", BackendKind::Relational);
        set.problems.push(Problem::new("problem4", "SELECT 1;"));
        assert!(set.problem("problem4").is_some());
        assert!(set.problem("problem99").is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_backend_kind_names() {
        assert_eq!(BackendKind::Relational.as_str(), "relational");
        assert_eq!(BackendKind::Xml.to_string(), "xml");
        assert_eq!(BackendKind::Document.as_str(), "document");
    }
}
