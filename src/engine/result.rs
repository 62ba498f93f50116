//! Result types for query execution.
//!
//! Each backend returns its own record shape: tabular rows, serialized XML
//! nodes, or JSON documents. They are unified only as "a sequence of
//! loosely-typed records" plus the raw engine output.

use serde_json::Value;

use crate::fixture::normalize_line;

/// One loosely-typed record returned by an engine
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A tabular row from a relational engine
    Row(Vec<String>),
    /// A serialized node (or bare text item) from an XML engine
    Node(String),
    /// A document from a document store
    Document(Value),
}

impl Record {
    /// Renders the record as normalized comparison lines.
    ///
    /// Rows join fields with single spaces, nodes normalize each serialized
    /// line, and documents render as compact JSON on one line.
    pub fn render(&self) -> Vec<String> {
        match self {
            Record::Row(fields) => {
                vec![normalize_line(&fields.join(" "))]
            }
            Record::Node(text) => text
                .lines()
                .map(normalize_line)
                .filter(|l| !l.is_empty())
                .collect(),
            Record::Document(value) => vec![value.to_string()],
        }
    }
}

/// The full result of executing one query
#[derive(Debug, Clone)]
pub struct ResultSet {
    /// Records in engine order
    pub records: Vec<Record>,
    /// Raw engine output, for reporting and debugging
    pub raw: String,
}

impl ResultSet {
    /// Creates a result set
    pub fn new(records: Vec<Record>, raw: impl Into<String>) -> Self {
        Self {
            records,
            raw: raw.into(),
        }
    }

    /// An empty result set
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            raw: String::new(),
        }
    }

    /// Number of records returned
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records were returned
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Renders all records as normalized comparison lines, in order
    pub fn render_lines(&self) -> Vec<String> {
        self.records.iter().flat_map(|r| r.render()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_renders_single_normalized_line() {
        let record = Record::Row(vec!["Green Book".into(), "2019".into()]);
        assert_eq!(record.render(), vec!["Green Book 2019"]);
    }

    #[test]
    fn test_node_renders_per_line() {
        let record = Record::Node("<name>\n  Spotlight\n</name>".into());
        assert_eq!(record.render(), vec!["<name>", "Spotlight", "</name>"]);
    }

    #[test]
    fn test_document_renders_compact_json() {
        let record = Record::Document(json!({"name": "The Kid", "runtime": 68}));
        let lines = record.render();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"runtime\":68"));
    }

    #[test]
    fn test_result_set_renders_in_order() {
        let set = ResultSet::new(
            vec![
                Record::Row(vec!["541".into()]),
                Record::Row(vec!["542".into()]),
            ],
            "541\n542\n",
        );
        assert_eq!(set.render_lines(), vec!["541", "542"]);
        assert_eq!(set.len(), 2);
    }
}
