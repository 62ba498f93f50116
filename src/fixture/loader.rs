//! Fixture loader for reading problem-set files at harness start.
//!
//! Sets are read once, held read-only, and discarded at process exit. Loading
//! is deterministic: the same file always yields the same ordered problems.

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{FixtureError, FixtureResult};
use super::parser::FixtureParser;
use super::types::{BackendKind, ProblemSet};

/// Loads problem sets from a fixtures directory
pub struct FixtureLoader {
    /// Directory containing fixture files
    fixtures_dir: PathBuf,
}

impl FixtureLoader {
    /// Creates a loader rooted at the given fixtures directory
    pub fn new(fixtures_dir: impl Into<PathBuf>) -> Self {
        Self {
            fixtures_dir: fixtures_dir.into(),
        }
    }

    /// Returns the fixtures directory path
    pub fn fixtures_dir(&self) -> &Path {
        &self.fixtures_dir
    }

    /// Loads one problem set from a file inside the fixtures directory
    pub fn load_set(
        &self,
        set_id: &str,
        file: &str,
        backend: BackendKind,
    ) -> FixtureResult<ProblemSet> {
        let path = self.fixtures_dir.join(file);
        let text = fs::read_to_string(&path).map_err(|e| FixtureError::Unreadable {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;

        let parser = FixtureParser::new(set_id);
        let problems = parser.parse(&text)?;

        let mut set = ProblemSet::new(set_id, backend);
        set.problems = problems;
        Ok(set)
    }
}
