//! Grouping classified rows into records
//!
//! Consecutive content rows merge into one [`Record`]; every separator row
//! closes the current record and opens a new one. Records are emitted even
//! when empty, so a leading separator or two separators in a row each still
//! mark a record boundary.

use tracing::debug;

use super::classify::{ClassifiedRow, RowKind};
use super::record::Record;
use crate::utils::diagnostics::Diagnostic;

/// Accumulates rows into the record currently being built
struct Grouper<'w> {
    records: Vec<Record>,
    current: Record,
    warnings: &'w mut Vec<Diagnostic>,
}

impl<'w> Grouper<'w> {
    fn new(warnings: &'w mut Vec<Diagnostic>) -> Self {
        Self {
            records: Vec::new(),
            current: Record::new(1),
            warnings,
        }
    }

    /// Push the current record and start a new one at `next_line`
    fn close(&mut self, next_line: usize) {
        let done = std::mem::replace(&mut self.current, Record::new(next_line));
        self.records.push(done);
    }

    /// First writer wins: only the first content row sets the depth
    fn claim_depth(&mut self, depth: usize, line: usize) {
        match self.current.depth {
            None => {
                self.current.depth = Some(depth);
                self.current.line = line;
            }
            Some(existing) if existing != depth => {
                self.warnings.push(
                    Diagnostic::warning(format!(
                        "row at depth {} merged into a record at depth {}",
                        depth, existing
                    ))
                    .at_line(line)
                    .with_suggestion("separate records with an empty row"),
                );
            }
            Some(_) => {}
        }
    }

    fn warn_shadowed(&mut self, label: &str, line: usize) {
        self.warnings.push(
            Diagnostic::warning(format!(
                "value of '{}' is replaced by the children nested under the same label",
                label
            ))
            .at_line(line),
        );
    }

    fn push_row(&mut self, row: ClassifiedRow) {
        match row.kind {
            RowKind::Separator => self.close(row.line + 1),
            RowKind::Entry {
                depth,
                label,
                value,
            } => {
                self.claim_depth(depth, row.line);
                if self.current.children_label.as_deref() == Some(label.as_str()) {
                    self.warn_shadowed(&label, row.line);
                }
                if self.current.entries.insert(label.clone(), value).is_some() {
                    self.warnings.push(
                        Diagnostic::warning(format!(
                            "label '{}' repeated within one record; the last value is kept",
                            label
                        ))
                        .at_line(row.line),
                    );
                }
            }
            RowKind::ChildrenDecl { depth, label } => {
                self.claim_depth(depth, row.line);
                if let Some(existing) = &self.current.children_label {
                    let message = format!(
                        "record already declares children as '{}'; '{}' is ignored",
                        existing, label
                    );
                    self.warnings.push(Diagnostic::warning(message).at_line(row.line));
                    return;
                }
                if self.current.entries.contains_key(&label) {
                    self.warn_shadowed(&label, row.line);
                }
                self.current.children_slot = self.current.entries.len();
                self.current.children_label = Some(label);
            }
        }
    }

    fn finish(mut self) -> Vec<Record> {
        let last = std::mem::take(&mut self.current);
        self.records.push(last);
        self.records
    }
}

/// Merge classified rows into records, splitting at separators.
///
/// Always returns at least one record: the trailing accumulator is pushed
/// unconditionally.
pub fn group_rows(rows: Vec<ClassifiedRow>, warnings: &mut Vec<Diagnostic>) -> Vec<Record> {
    let mut grouper = Grouper::new(warnings);
    for row in rows {
        grouper.push_row(row);
    }
    let records = grouper.finish();

    debug!(
        records = records.len(),
        empty = records.iter().filter(|r| r.is_empty()).count(),
        "grouped rows into records"
    );
    records
}
