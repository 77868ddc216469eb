//! Intermediate records produced by the grouping stage

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single input row: ordered, already-trimmed cells
pub type Row = Vec<String>;

/// A row read from a CSV source, with the line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-indexed line of the row's first cell
    pub line: usize,
    pub cells: Row,
}

/// Rows the pipeline accepts.
///
/// Rows that know where they came from report that line; plain cell
/// vectors report their 1-indexed row number instead.
pub trait InputRow {
    type Cell: AsRef<str>;

    fn cells(&self) -> &[Self::Cell];

    /// Line reported in diagnostics for the row at `index`
    fn line(&self, index: usize) -> usize;
}

impl<S: AsRef<str>> InputRow for Vec<S> {
    type Cell = S;

    fn cells(&self) -> &[S] {
        self
    }

    fn line(&self, index: usize) -> usize {
        index + 1
    }
}

impl InputRow for SourceRow {
    type Cell = String;

    fn cells(&self) -> &[String] {
        &self.cells
    }

    fn line(&self, _index: usize) -> usize {
        self.line
    }
}

/// The value paired with a label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Plain cell text
    Text(String),
    /// Comma-separated cell split into trimmed tokens
    List(Vec<String>),
}

impl Value {
    /// Parse a value cell, splitting on `separator` when the cell contains it.
    pub fn parse(cell: &str, separator: Option<char>, keep_empty: bool) -> Self {
        match separator {
            Some(sep) if cell.contains(sep) => Value::List(
                cell.split(sep)
                    .map(str::trim)
                    .filter(|item| keep_empty || !item.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            _ => Value::Text(cell.to_string()),
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            Value::Text(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(String::from).collect())
    }
}

/// A grouped unit representing one tree node before cleanup.
///
/// Carries the bookkeeping the tree builder needs (`depth`,
/// `children_label`) next to the user-facing entries. Children are held in
/// a dedicated field; `children_label` names the key they serialize under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Line of the first row merged into this record (row number for
    /// rows without a source position)
    pub line: usize,
    /// Depth of the introducing row; `None` for an empty record
    pub depth: Option<usize>,
    /// Label of the children declaration row, if the record has one
    pub children_label: Option<String>,
    /// Number of entries that preceded the children declaration
    pub children_slot: usize,
    /// Label/value pairs in insertion order
    pub entries: IndexMap<String, Value>,
    /// Child records, attached by the tree builder
    pub children: Vec<Record>,
}

impl Record {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            ..Self::default()
        }
    }

    /// True when no content row was merged into this record
    pub fn is_empty(&self) -> bool {
        self.depth.is_none()
    }

    /// True when the record declares a children label
    pub fn has_children_label(&self) -> bool {
        self.children_label.as_deref().is_some_and(|l| !l.is_empty())
    }

    /// First label of the record, used to name it in diagnostics
    pub fn display_label(&self) -> &str {
        self.entries
            .keys()
            .next()
            .map(String::as_str)
            .or(self.children_label.as_deref())
            .unwrap_or("")
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.entries.get(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_value() {
        assert_eq!(Value::parse("name", Some(','), true), Value::from("name"));
        assert_eq!(Value::parse("a;b", Some(','), true), Value::from("a;b"));
    }

    #[test]
    fn test_parse_comma_list_trims_items() {
        assert_eq!(
            Value::parse("a, b,c", Some(','), true),
            Value::from(vec!["a", "b", "c"])
        );
    }

    #[test]
    fn test_parse_keeps_or_drops_empty_items() {
        assert_eq!(
            Value::parse("a,,b, ", Some(','), true),
            Value::from(vec!["a", "", "b", ""])
        );
        assert_eq!(
            Value::parse("a,,b, ", Some(','), false),
            Value::from(vec!["a", "b"])
        );
    }

    #[test]
    fn test_parse_without_separator() {
        assert_eq!(Value::parse("a, b", None, true), Value::from("a, b"));
    }

    #[test]
    fn test_parse_custom_separator() {
        assert_eq!(
            Value::parse("x | y", Some('|'), true),
            Value::from(vec!["x", "y"])
        );
    }

    #[test]
    fn test_empty_record() {
        let record = Record::new(3);
        assert!(record.is_empty());
        assert!(!record.has_children_label());
        assert_eq!(record.display_label(), "");
    }
}
