//! Parser for the answer-file fixture format.
//!
//! Fixture files are sequences of named triple-quoted string assignments:
//!
//! ```text
//! problem4 = """
//!     SELECT ...
//! """
//! """
//!     Output:
//!     ...
//! """
//! ```
//!
//! The variable name is the problem id and the string body is the query. A
//! bare triple-quoted block after a problem (either `"""` or `'''` quoting)
//! records that problem's expected output. `#` comments between blocks are
//! ignored. Problems with empty bodies, unterminated strings, duplicate ids,
//! and output blocks with no preceding problem are malformed fixtures.

use std::collections::HashSet;

use regex::Regex;

use super::errors::{FixtureError, FixtureResult};
use super::types::{ExpectedOutput, Problem};

/// The two triple-quote conventions the format allows
const DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// What an open triple-quoted string will become once closed
enum Block {
    /// A problem declaration (`name = """`)
    Query { id: String, opened_at: usize },
    /// A bare expected-output block
    Output { opened_at: usize },
}

/// Parses one fixture file into an ordered problem list
pub struct FixtureParser {
    set_id: String,
    assign_re: Regex,
}

impl FixtureParser {
    /// Creates a parser for the named problem set
    pub fn new(set_id: impl Into<String>) -> Self {
        // Unwrap is safe: the pattern is a compile-time constant.
        let assign_re =
            Regex::new(r#"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*("""|''')(.*)$"#).unwrap();
        Self {
            set_id: set_id.into(),
            assign_re,
        }
    }

    /// Parses fixture text into problems, in declaration order
    pub fn parse(&self, text: &str) -> FixtureResult<Vec<Problem>> {
        let mut problems: Vec<Problem> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        let mut open: Option<(Block, &str, String)> = None;

        for (idx, line) in text.lines().enumerate() {
            let lineno = idx + 1;

            if let Some((block, delim, mut body)) = open.take() {
                match line.find(delim) {
                    Some(pos) => {
                        body.push_str(&line[..pos]);
                        self.close_block(block, body, &mut problems, &mut seen)?;
                    }
                    None => {
                        body.push_str(line);
                        body.push('\n');
                        open = Some((block, delim, body));
                    }
                }
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(caps) = self.assign_re.captures(line) {
                let id = caps[1].to_string();
                let delim = if &caps[2] == "\"\"\"" { DELIMITERS[0] } else { DELIMITERS[1] };
                let rest = caps.get(3).map_or("", |m| m.as_str());
                let block = Block::Query {
                    id,
                    opened_at: lineno,
                };
                open = self.open_block(block, delim, rest, &mut problems, &mut seen)?;
                continue;
            }

            if let Some(delim) = DELIMITERS.iter().find(|d| trimmed.starts_with(**d)) {
                if problems.is_empty() {
                    return Err(FixtureError::OrphanOutput {
                        set: self.set_id.clone(),
                        line: lineno,
                    });
                }
                let rest = &trimmed[delim.len()..];
                let block = Block::Output { opened_at: lineno };
                open = self.open_block(block, delim, rest, &mut problems, &mut seen)?;
                continue;
            }

            // Stray text between blocks is tolerated, matching how loosely
            // the original answer files were edited.
        }

        if let Some((block, _, _)) = open {
            let opened_at = match block {
                Block::Query { opened_at, .. } => opened_at,
                Block::Output { opened_at } => opened_at,
            };
            return Err(FixtureError::UnterminatedString {
                set: self.set_id.clone(),
                line: opened_at,
            });
        }

        Ok(problems)
    }

    /// Starts a block, closing it immediately when the delimiter reappears on
    /// the opening line.
    fn open_block<'a>(
        &self,
        block: Block,
        delim: &'a str,
        rest: &str,
        problems: &mut Vec<Problem>,
        seen: &mut HashSet<String>,
    ) -> FixtureResult<Option<(Block, &'a str, String)>> {
        match rest.find(delim) {
            Some(pos) => {
                self.close_block(block, rest[..pos].to_string(), problems, seen)?;
                Ok(None)
            }
            None => {
                let mut body = String::new();
                if !rest.is_empty() {
                    body.push_str(rest);
                    body.push('\n');
                }
                Ok(Some((block, delim, body)))
            }
        }
    }

    fn close_block(
        &self,
        block: Block,
        body: String,
        problems: &mut Vec<Problem>,
        seen: &mut HashSet<String>,
    ) -> FixtureResult<()> {
        match block {
            Block::Query { id, .. } => {
                let query = body.trim();
                if query.is_empty() {
                    return Err(FixtureError::EmptyQuery {
                        set: self.set_id.clone(),
                        problem: id,
                    });
                }
                if !seen.insert(id.clone()) {
                    return Err(FixtureError::DuplicateProblem {
                        set: self.set_id.clone(),
                        problem: id,
                    });
                }
                problems.push(Problem::new(id, query));
            }
            Block::Output { .. } => {
                let expected = ExpectedOutput::from_block(&body);
                // Attach to the most recent problem. A second block for the
                // same problem is ignored rather than overwriting the first.
                if let Some(last) = problems.last_mut() {
                    if last.expected.is_none() && !expected.is_empty() {
                        last.expected = Some(expected);
                    }
                }
            }
        }
        Ok(())
    }
}
