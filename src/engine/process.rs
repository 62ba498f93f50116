//! Process-backed engine adapter.
//!
//! The harness never embeds an engine. Each backend is reached through a
//! configured client command (for example `sqlite3 movie.db`, `basex -i
//! movie.xml`, or `mongosh --quiet movies`): the query is written to the
//! client's stdin and its stdout is decoded into the backend's record shape.
//! Engine failures surface unchanged, stderr and all.

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;

use crate::fixture::BackendKind;

use super::adapter::EngineAdapter;
use super::errors::{EngineError, EngineResult};
use super::result::{Record, ResultSet};

/// An engine adapter that shells out to a client command
pub struct ProcessEngine {
    kind: BackendKind,
    command: String,
    args: Vec<String>,
}

impl ProcessEngine {
    /// Creates an adapter for the given backend and client invocation
    pub fn new(kind: BackendKind, command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            kind,
            command: command.into(),
            args,
        }
    }

    /// Returns the configured client command
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Runs the client with the query on stdin and returns raw stdout
    fn run_client(&self, query: &str) -> EngineResult<String> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EngineError::Spawn {
                command: self.command.clone(),
                detail: e.to_string(),
            })?;

        if let Some(stdin) = child.stdin.as_mut() {
            // A broken pipe here means the client exited early; its exit
            // status below is the real story.
            let write = stdin
                .write_all(query.as_bytes())
                .and_then(|_| stdin.write_all(b"\n"));
            if let Err(e) = write {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(EngineError::Spawn {
                        command: self.command.clone(),
                        detail: format!("failed to write query to stdin: {}", e),
                    });
                }
            }
        }
        drop(child.stdin.take());

        let output = child.wait_with_output().map_err(|e| EngineError::Spawn {
            command: self.command.clone(),
            detail: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(EngineError::Engine {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl EngineAdapter for ProcessEngine {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn execute(&self, query: &str) -> EngineResult<ResultSet> {
        let raw = self.run_client(query)?;
        let records = decode(self.kind, &raw)?;
        Ok(ResultSet::new(records, raw))
    }
}

/// Decodes raw client output into the backend's record shape
pub fn decode(kind: BackendKind, raw: &str) -> EngineResult<Vec<Record>> {
    match kind {
        BackendKind::Relational => Ok(decode_rows(raw)),
        BackendKind::Xml => Ok(decode_nodes(raw)),
        BackendKind::Document => decode_documents(raw),
    }
}

/// One row per non-empty line, fields split on tabs (or `|` when no tab is
/// present, matching sqlite3's default separator).
fn decode_rows(raw: &str) -> Vec<Record> {
    raw.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let sep = if line.contains('\t') { '\t' } else { '|' };
            let fields = line.split(sep).map(|f| f.trim().to_string()).collect();
            Record::Row(fields)
        })
        .collect()
}

/// Splits serialized XML output into top-level items.
///
/// Depth is tracked across element tags, with quote tracking inside tags so a
/// `>` in an attribute value does not close one. Text at depth zero becomes
/// bare text records, one per line.
fn decode_nodes(raw: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    let mut in_tag = false;
    let mut quote: Option<char> = None;
    let mut tag = String::new();

    fn flush_text(buf: &mut String, records: &mut Vec<Record>) {
        for line in buf.lines() {
            if !line.trim().is_empty() {
                records.push(Record::Node(line.trim().to_string()));
            }
        }
        buf.clear();
    }

    for c in raw.chars() {
        if in_tag {
            tag.push(c);
            match quote {
                Some(q) => {
                    if c == q {
                        quote = None;
                    }
                }
                None => match c {
                    '"' | '\'' => quote = Some(c),
                    '>' => {
                        in_tag = false;
                        current.push_str(&tag);
                        let closing = tag.starts_with("</");
                        let self_closing = tag.trim_end_matches('>').ends_with('/');
                        let declaration = tag.starts_with("<?") || tag.starts_with("<!");
                        if !declaration {
                            if closing {
                                depth -= 1;
                            } else if !self_closing {
                                depth += 1;
                            }
                        }
                        if depth <= 0 {
                            depth = 0;
                            records.push(Record::Node(current.trim().to_string()));
                            current.clear();
                        }
                        tag.clear();
                    }
                    _ => {}
                },
            }
            continue;
        }

        if c == '<' {
            if depth == 0 {
                flush_text(&mut current, &mut records);
            }
            in_tag = true;
            tag.clear();
            tag.push(c);
        } else {
            current.push(c);
        }
    }

    if depth == 0 {
        flush_text(&mut current, &mut records);
    } else if !current.trim().is_empty() {
        // Unbalanced output is kept as a single node rather than dropped.
        records.push(Record::Node(current.trim().to_string()));
    }

    records
}

/// One document per JSON value: a top-level array, a single object, or
/// JSON-lines. Anything else is a decode error.
fn decode_documents(raw: &str) -> EngineResult<Vec<Record>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(match value {
            Value::Array(items) => items.into_iter().map(Record::Document).collect(),
            other => vec![Record::Document(other)],
        });
    }

    let mut records = Vec::new();
    for line in trimmed.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|e| EngineError::Decode {
            detail: format!("invalid JSON document '{}': {}", line, e),
        })?;
        records.push(Record::Document(value));
    }
    Ok(records)
}
