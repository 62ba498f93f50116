//! Harness configuration.
//!
//! Loaded from a JSON file (default `./queryfix.json`): the fixtures
//! directory, the ordered list of problem sets, and the client command for
//! each backend's engine. Engines are optional so `list` and `check` work
//! without any engine installed.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fixture::BackendKind;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config '{path}': {detail}")]
    Unreadable { path: String, detail: String },

    /// The config file is not valid JSON for this schema
    #[error("Invalid config '{path}': {detail}")]
    Invalid { path: String, detail: String },

    /// Two sets share an id
    #[error("Duplicate set id '{set}' in config")]
    DuplicateSet { set: String },
}

/// One problem set's entry in the config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetConfig {
    /// Set identifier, e.g. "ps1"
    pub id: String,
    /// Fixture file name inside `fixtures_dir`
    pub file: String,
    /// Backend the set's queries target
    pub backend: BackendKind,
}

/// Client invocation for one backend's engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Client executable, e.g. "sqlite3"
    pub command: String,
    /// Arguments passed before the query is written to stdin
    #[serde(default)]
    pub args: Vec<String>,
}

/// Configured engines, one optional entry per backend kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnginesConfig {
    #[serde(default)]
    pub relational: Option<EngineConfig>,
    #[serde(default)]
    pub xml: Option<EngineConfig>,
    #[serde(default)]
    pub document: Option<EngineConfig>,
}

impl EnginesConfig {
    /// Returns the client config for one backend, if any
    pub fn for_backend(&self, kind: BackendKind) -> Option<&EngineConfig> {
        match kind {
            BackendKind::Relational => self.relational.as_ref(),
            BackendKind::Xml => self.xml.as_ref(),
            BackendKind::Document => self.document.as_ref(),
        }
    }
}

/// Top-level harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing fixture files (default "./fixtures")
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: String,

    /// Problem sets, in run order
    #[serde(default = "Config::default_sets")]
    pub sets: Vec<SetConfig>,

    /// Engine client commands, per backend
    #[serde(default)]
    pub engines: EnginesConfig,
}

fn default_fixtures_dir() -> String {
    "./fixtures".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixtures_dir: default_fixtures_dir(),
            sets: Self::default_sets(),
            engines: EnginesConfig::default(),
        }
    }
}

impl Config {
    /// The shipped corpus: ps1 (SQL), ps3/ps4 (XQuery), ps5 (MongoDB)
    pub fn default_sets() -> Vec<SetConfig> {
        vec![
            SetConfig {
                id: "ps1".to_string(),
                file: "ps1_queries.py".to_string(),
                backend: BackendKind::Relational,
            },
            SetConfig {
                id: "ps3".to_string(),
                file: "ps3_queries.py".to_string(),
                backend: BackendKind::Xml,
            },
            SetConfig {
                id: "ps4".to_string(),
                file: "ps4_queries.py".to_string(),
                backend: BackendKind::Xml,
            },
            SetConfig {
                id: "ps5".to_string(),
                file: "ps5_queries.py".to_string(),
                backend: BackendKind::Document,
            },
        ]
    }

    /// Loads and validates a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            let config = Config::default();
            config.validate()?;
            return Ok(config);
        }

        let text = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;

        let config: Config = serde_json::from_str(&text).map_err(|e| ConfigError::Invalid {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field invariants (unique set ids)
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for set in &self.sets {
            if !seen.insert(set.id.as_str()) {
                return Err(ConfigError::DuplicateSet {
                    set: set.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Looks up one set's config by id
    pub fn set(&self, id: &str) -> Option<&SetConfig> {
        self.sets.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(&tmp.path().join("queryfix.json")).unwrap();
        assert_eq!(config.sets.len(), 4);
        assert_eq!(config.sets[0].id, "ps1");
        assert!(config.engines.relational.is_none());
    }

    #[test]
    fn test_load_and_validate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("queryfix.json");
        fs::write(
            &path,
            r#"{
                "fixtures_dir": "fixtures",
                "sets": [{"id": "ps1", "file": "ps1_queries.py", "backend": "relational"}],
                "engines": {"relational": {"command": "sqlite3", "args": ["movie.db"]}}
            }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.sets.len(), 1);
        let engine = config.engines.for_backend(BackendKind::Relational).unwrap();
        assert_eq!(engine.command, "sqlite3");
        assert_eq!(engine.args, vec!["movie.db"]);
    }

    #[test]
    fn test_duplicate_set_ids_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("queryfix.json");
        fs::write(
            &path,
            r#"{"sets": [
                {"id": "ps1", "file": "a.py", "backend": "relational"},
                {"id": "ps1", "file": "b.py", "backend": "xml"}
            ]}"#,
        )
        .unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSet { .. }));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("queryfix.json");
        fs::write(
            &path,
            r#"{"sets": [{"id": "ps1", "file": "a.py", "backend": "graph"}]}"#,
        )
        .unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
