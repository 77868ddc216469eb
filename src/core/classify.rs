//! Row classification
//!
//! Each row is either a separator (every cell empty) or a content row.
//! A content row's depth is the number of leading empty cells; the cell at
//! that depth is its label and the next cell its value. A label with no
//! value declares the children of the enclosing record.

use tracing::trace;

use super::options::ConvertOptions;
use super::record::{InputRow, Value};
use crate::utils::diagnostics::Diagnostic;
use crate::utils::error::{TreeError, TreeResult};

/// What a single row contributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// All cells empty: closes the current record
    Separator,
    /// `label, value` pair at `depth`
    Entry {
        depth: usize,
        label: String,
        value: Value,
    },
    /// Label without a value: names the record's children
    ChildrenDecl { depth: usize, label: String },
}

/// A row together with the line it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRow {
    pub line: usize,
    pub kind: RowKind,
}

impl ClassifiedRow {
    pub fn is_separator(&self) -> bool {
        matches!(self.kind, RowKind::Separator)
    }

    pub fn depth(&self) -> Option<usize> {
        match &self.kind {
            RowKind::Separator => None,
            RowKind::Entry { depth, .. } | RowKind::ChildrenDecl { depth, .. } => Some(*depth),
        }
    }
}

/// Classify one row.
///
/// A row too short to hold a value cell is read as a children declaration,
/// with a warning; in strict mode it is a [`TreeError::MalformedRow`].
pub fn classify_row<S: AsRef<str>>(
    row: &[S],
    line: usize,
    options: &ConvertOptions,
    warnings: &mut Vec<Diagnostic>,
) -> TreeResult<ClassifiedRow> {
    let Some(depth) = row.iter().position(|cell| !cell.as_ref().is_empty()) else {
        return Ok(ClassifiedRow {
            line,
            kind: RowKind::Separator,
        });
    };

    let label = row[depth].as_ref().to_string();
    let kind = match row.get(depth + 1).map(|cell| cell.as_ref()) {
        None => {
            if options.strict {
                return Err(TreeError::malformed(line, depth, row.len()));
            }
            warnings.push(
                Diagnostic::warning(format!(
                    "row has no value column after '{}'; read as a children declaration",
                    label
                ))
                .at_line(line),
            );
            RowKind::ChildrenDecl { depth, label }
        }
        Some("") => RowKind::ChildrenDecl { depth, label },
        Some(cell) => RowKind::Entry {
            depth,
            label,
            value: Value::parse(cell, options.list_separator, options.keep_empty_list_items),
        },
    };

    Ok(ClassifiedRow { line, kind })
}

/// Classify every row, tagging each with the line it reports
pub fn classify_rows<R: InputRow>(
    rows: &[R],
    options: &ConvertOptions,
    warnings: &mut Vec<Diagnostic>,
) -> TreeResult<Vec<ClassifiedRow>> {
    let classified = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| classify_row(row.cells(), row.line(idx), options, warnings))
        .collect::<TreeResult<Vec<_>>>()?;

    trace!(
        rows = classified.len(),
        separators = classified.iter().filter(|r| r.is_separator()).count(),
        "classified rows"
    );
    Ok(classified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::SourceRow;

    fn classify(cells: &[&str]) -> ClassifiedRow {
        let mut warnings = Vec::new();
        classify_row(cells, 1, &ConvertOptions::default(), &mut warnings).unwrap()
    }

    #[test]
    fn test_separator() {
        assert!(classify(&["", "", "", ""]).is_separator());
        assert!(classify(&[]).is_separator());
    }

    #[test]
    fn test_entry_at_depth_zero() {
        let row = classify(&["Root", "name", "", ""]);
        assert_eq!(
            row.kind,
            RowKind::Entry {
                depth: 0,
                label: "Root".to_string(),
                value: Value::from("name"),
            }
        );
    }

    #[test]
    fn test_entry_depth_from_leading_empty_cells() {
        let row = classify(&["", "", "Leaf", "x"]);
        assert_eq!(row.depth(), Some(2));
    }

    #[test]
    fn test_children_declaration() {
        let row = classify(&["Children", "", "", ""]);
        assert_eq!(
            row.kind,
            RowKind::ChildrenDecl {
                depth: 0,
                label: "Children".to_string(),
            }
        );
    }

    #[test]
    fn test_comma_value_is_split() {
        let row = classify(&["Tags", "a, b,c"]);
        match row.kind {
            RowKind::Entry { value, .. } => assert_eq!(value, Value::from(vec!["a", "b", "c"])),
            other => panic!("expected entry, got {:?}", other),
        }
    }

    #[test]
    fn test_short_row_is_declaration_with_warning() {
        let mut warnings = Vec::new();
        let row = classify_row(&["", "", "Kids"], 4, &ConvertOptions::default(), &mut warnings)
            .unwrap();
        assert_eq!(
            row.kind,
            RowKind::ChildrenDecl {
                depth: 2,
                label: "Kids".to_string(),
            }
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, Some(4));
    }

    #[test]
    fn test_short_row_is_error_in_strict_mode() {
        let mut warnings = Vec::new();
        let err = classify_row(&["", "Kids"], 9, &ConvertOptions::strict(), &mut warnings)
            .unwrap_err();
        assert_eq!(
            err,
            TreeError::MalformedRow {
                line: 9,
                depth: 1,
                width: 2,
            }
        );
    }

    #[test]
    fn test_classify_rows_keeps_source_lines() {
        let rows = vec![
            SourceRow {
                line: 1,
                cells: vec!["Root".to_string(), "x".to_string()],
            },
            SourceRow {
                line: 3,
                cells: vec!["Kids".to_string()],
            },
        ];
        let mut warnings = Vec::new();
        let classified = classify_rows(&rows, &ConvertOptions::default(), &mut warnings).unwrap();
        assert_eq!(classified[1].line, 3);
        assert_eq!(warnings[0].line, Some(3));
    }

    #[test]
    fn test_classify_rows_numbers_lines() {
        let rows = vec![vec!["A", "1"], vec!["", ""], vec!["", "B"]];
        let mut warnings = Vec::new();
        let classified = classify_rows(&rows, &ConvertOptions::default(), &mut warnings).unwrap();
        assert_eq!(
            classified.iter().map(|r| r.line).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(classified[1].is_separator());
        assert_eq!(warnings.len(), 1);
    }
}
