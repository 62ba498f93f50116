//! Shallow syntax gate for fixture queries.
//!
//! This is a validity check, not a grammar: the external engine remains the
//! authority on whether a query parses. The gate catches what a regression
//! corpus most often breaks on after hand edits: empty bodies, unbalanced
//! delimiters, and query text aimed at the wrong backend.

use thiserror::Error;

use crate::fixture::BackendKind;

/// Result type for syntax checks
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// A failed shallow validity check
#[derive(Debug, Clone, Error)]
pub enum SyntaxError {
    /// Query body is empty or whitespace
    #[error("Query text is empty")]
    Empty,

    /// A bracket-style delimiter is unbalanced
    #[error("Unbalanced '{delimiter}' (depth {depth} at end of query)")]
    Unbalanced { delimiter: char, depth: i32 },

    /// A string literal was never closed
    #[error("Unterminated string literal starting with {quote}")]
    UnterminatedLiteral { quote: char },

    /// The query does not look like its declared backend's language
    #[error("Query does not look like a {backend} query: {detail}")]
    WrongShape { backend: BackendKind, detail: String },
}

/// Checks one query against its declared backend
pub fn check(kind: BackendKind, query: &str) -> SyntaxResult<()> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SyntaxError::Empty);
    }

    check_balance(kind, trimmed)?;

    match kind {
        BackendKind::Relational => check_relational_lead(trimmed),
        BackendKind::Document => check_document_lead(trimmed),
        // XQuery admits path expressions, FLWOR blocks, and bare element
        // constructors; no useful lead-keyword restriction exists.
        BackendKind::Xml => Ok(()),
    }
}

const SQL_LEADS: [&str; 5] = ["SELECT", "WITH", "INSERT", "UPDATE", "DELETE"];

fn check_relational_lead(query: &str) -> SyntaxResult<()> {
    let first = query
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_uppercase();
    if SQL_LEADS.contains(&first.as_str()) {
        Ok(())
    } else {
        Err(SyntaxError::WrongShape {
            backend: BackendKind::Relational,
            detail: format!("unexpected leading keyword '{}'", first),
        })
    }
}

fn check_document_lead(query: &str) -> SyntaxResult<()> {
    if query.starts_with("db.") {
        Ok(())
    } else {
        Err(SyntaxError::WrongShape {
            backend: BackendKind::Document,
            detail: "expected a 'db.<collection>' method call".to_string(),
        })
    }
}

/// Verifies that (), [], {} balance outside string literals.
///
/// Regex literals in document queries (`/Florida, USA/`) and XML attribute
/// text make full lexing unattractive; quote tracking covers the cases the
/// corpus actually exhibits.
fn check_balance(kind: BackendKind, query: &str) -> SyntaxResult<()> {
    let mut paren = 0i32;
    let mut bracket = 0i32;
    let mut brace = 0i32;
    let mut quote: Option<char> = None;

    for c in query.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' => paren += 1,
            ')' => paren -= 1,
            '[' => bracket += 1,
            ']' => bracket -= 1,
            '{' => brace += 1,
            '}' => brace -= 1,
            _ => {}
        }
    }

    if let Some(q) = quote {
        // SQL uses '' doubling and apostrophes appear inside XML text; only
        // the document backend is strict about string closure.
        if kind == BackendKind::Document {
            return Err(SyntaxError::UnterminatedLiteral { quote: q });
        }
    }

    for (delimiter, depth) in [('(', paren), ('[', bracket), ('{', brace)] {
        if depth != 0 {
            return Err(SyntaxError::Unbalanced { delimiter, depth });
        }
    }
    Ok(())
}
