//! Depth-based tree reconstruction
//!
//! The records form a flat, pre-order listing of the tree. For a record
//! that declares a children label, its children are the records one level
//! deeper within its range. Each child's own range runs from its index up
//! to the next child's index (or the end of the parent's range), and the
//! child is built from that range recursively.
//!
//! ```text
//! idx  depth  record
//!  0     0    Root        range [0, 6)  children at depth 1: 1, 4
//!  1     1    A           range [1, 4)  children at depth 2: 2, 3
//!  2     2    A.1         range [2, 3)
//!  3     2    A.2         range [3, 4)
//!  4     1    B           range [4, 6)
//!  5     -    (empty)     never a child
//! ```

use tracing::{debug, trace};

use super::options::ConvertOptions;
use super::record::Record;
use crate::utils::diagnostics::Diagnostic;
use crate::utils::error::{TreeError, TreeResult};

/// Builds a tree out of a flat record sequence.
///
/// Records are moved out of the sequence as they are attached, so every
/// record ends up in at most one place in the tree. Whatever is left over
/// after building was not reachable from the root.
pub struct TreeBuilder<'a> {
    slots: Vec<Option<Record>>,
    options: &'a ConvertOptions,
    warnings: &'a mut Vec<Diagnostic>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(
        records: Vec<Record>,
        options: &'a ConvertOptions,
        warnings: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            slots: records.into_iter().map(Some).collect(),
            options,
            warnings,
        }
    }

    fn depth_at(&self, idx: usize) -> Option<usize> {
        self.slots[idx].as_ref().and_then(|r| r.depth)
    }

    /// Return the record at `begin` with its descendants from
    /// `[begin, end)` attached.
    ///
    /// A record without a children label is returned as-is. A record with
    /// a children label but no records one level deeper gets an empty
    /// child list.
    pub fn attach(&mut self, begin: usize, end: usize) -> TreeResult<Record> {
        let end = end.min(self.slots.len());
        let mut root = self
            .slots
            .get_mut(begin)
            .and_then(Option::take)
            .unwrap_or_default();

        if !root.has_children_label() {
            return Ok(root);
        }
        let Some(depth) = root.depth else {
            return Ok(root);
        };

        let starts: Vec<usize> = ((begin + 1)..end)
            .filter(|&idx| self.depth_at(idx) == Some(depth + 1))
            .collect();
        trace!(
            line = root.line,
            begin,
            end,
            children = starts.len(),
            "attaching children"
        );

        if starts.is_empty() {
            self.report_childless(&root, depth)?;
        }

        for (k, &start) in starts.iter().enumerate() {
            let stop = starts.get(k + 1).copied().unwrap_or(end);
            let child = self.attach(start, stop)?;
            root.children.push(child);
        }

        Ok(root)
    }

    fn report_childless(&mut self, root: &Record, depth: usize) -> TreeResult<()> {
        let label = root.children_label.clone().unwrap_or_default();
        let message = format!("children label has no records at depth {}", depth + 1);
        if self.options.strict {
            return Err(TreeError::inconsistent(root.line, label, message));
        }
        self.warnings.push(
            Diagnostic::warning(format!("'{}': {}", label, message))
                .at_line(root.line)
                .with_suggestion("indent child rows by one more empty cell than their parent"),
        );
        Ok(())
    }

    /// Build the whole tree rooted at the first record.
    ///
    /// Content records that no parent reached are reported (or, in strict
    /// mode, rejected).
    pub fn build(mut self) -> TreeResult<Record> {
        if self.slots.is_empty() {
            return Err(TreeError::EmptyInput);
        }

        let root = self.attach(0, self.slots.len())?;
        if root.is_empty() {
            self.warnings.push(
                Diagnostic::warning("first record is empty; the tree has no content")
                    .at_line(root.line)
                    .with_suggestion("remove leading empty rows"),
            );
        }

        let leftovers: Vec<Record> = self
            .slots
            .iter_mut()
            .filter_map(Option::take)
            .filter(|r| !r.is_empty())
            .collect();
        for record in &leftovers {
            let message = "record is not reachable from the root and was dropped";
            if self.options.strict {
                return Err(TreeError::inconsistent(
                    record.line,
                    record.display_label(),
                    message,
                ));
            }
            self.warnings.push(
                Diagnostic::warning(format!("'{}': {}", record.display_label(), message))
                    .at_line(record.line),
            );
        }

        debug!(
            unreachable = leftovers.len(),
            children = root.children.len(),
            "built tree"
        );
        Ok(root)
    }
}

/// Build a tree from grouped records
pub fn build_tree(
    records: Vec<Record>,
    options: &ConvertOptions,
    warnings: &mut Vec<Diagnostic>,
) -> TreeResult<Record> {
    TreeBuilder::new(records, options, warnings).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::Value;
    use pretty_assertions::assert_eq;

    fn record(line: usize, depth: usize, label: &str, children: Option<&str>) -> Record {
        let mut r = Record::new(line);
        r.depth = Some(depth);
        r.entries.insert(label.to_string(), Value::from("v"));
        r.children_label = children.map(String::from);
        r.children_slot = 1;
        r
    }

    fn labels(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.display_label()).collect()
    }

    fn assert_depths(record: &Record) {
        for child in &record.children {
            assert_eq!(child.depth, record.depth.map(|d| d + 1));
            assert_depths(child);
        }
    }

    #[test]
    fn test_leaf_root_is_returned_unchanged() {
        let mut warnings = Vec::new();
        let opts = ConvertOptions::default();
        let root = build_tree(
            vec![record(1, 0, "Root", None)],
            &opts,
            &mut warnings,
        )
        .unwrap();
        assert!(root.children.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_two_level_nesting() {
        let mut warnings = Vec::new();
        let opts = ConvertOptions::default();
        let records = vec![
            record(1, 0, "Root", Some("Children")),
            record(3, 1, "A", Some("Parts")),
            record(5, 2, "A1", None),
            record(7, 2, "A2", None),
            record(9, 1, "B", None),
            Record::new(11),
        ];
        let root = build_tree(records, &opts, &mut warnings).unwrap();

        assert_eq!(labels(&root.children), vec!["A", "B"]);
        assert_eq!(labels(&root.children[0].children), vec!["A1", "A2"]);
        assert!(root.children[1].children.is_empty());
        assert_depths(&root);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_child_range_stops_at_next_sibling() {
        let mut warnings = Vec::new();
        let opts = ConvertOptions::default();
        // B is a sibling of A, so A's range must not reach B's child
        let records = vec![
            record(1, 0, "Root", Some("Children")),
            record(2, 1, "A", Some("Kids")),
            record(3, 1, "B", Some("Kids")),
            record(4, 2, "B1", None),
        ];
        let root = build_tree(records, &opts, &mut warnings).unwrap();

        assert!(root.children[0].children.is_empty());
        assert_eq!(labels(&root.children[1].children), vec!["B1"]);
        // A declared children but got none
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, Some(2));
    }

    #[test]
    fn test_empty_records_are_never_children() {
        let mut warnings = Vec::new();
        let opts = ConvertOptions::default();
        let records = vec![
            record(1, 0, "Root", Some("Children")),
            Record::new(2),
            Record::new(3),
            record(4, 1, "A", None),
        ];
        let root = build_tree(records, &opts, &mut warnings).unwrap();
        assert_eq!(labels(&root.children), vec!["A"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_records_before_first_child_are_unreachable() {
        let mut warnings = Vec::new();
        let opts = ConvertOptions::default();
        let records = vec![
            record(1, 0, "Root", Some("Children")),
            record(3, 2, "Stray", None),
            record(5, 1, "A", None),
        ];
        let root = build_tree(records, &opts, &mut warnings).unwrap();
        assert_eq!(labels(&root.children), vec!["A"]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("Stray"));
    }

    #[test]
    fn test_strict_rejects_childless_label() {
        let mut warnings = Vec::new();
        let opts = ConvertOptions::strict();
        let err = build_tree(
            vec![record(1, 0, "Root", Some("Children"))],
            &opts,
            &mut warnings,
        )
        .unwrap_err();
        assert!(matches!(err, TreeError::InconsistentDepth { line: 1, .. }));
    }

    #[test]
    fn test_strict_rejects_unreachable_record() {
        let mut warnings = Vec::new();
        let opts = ConvertOptions::strict();
        let err = build_tree(
            vec![record(1, 0, "Root", None), record(2, 0, "Other", None)],
            &opts,
            &mut warnings,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TreeError::inconsistent(
                2,
                "Other",
                "record is not reachable from the root and was dropped"
            )
        );
    }

    #[test]
    fn test_empty_sequence_is_error() {
        let mut warnings = Vec::new();
        let opts = ConvertOptions::default();
        assert_eq!(
            build_tree(Vec::new(), &opts, &mut warnings),
            Err(TreeError::EmptyInput)
        );
    }

    #[test]
    fn test_attach_subrange() {
        let mut warnings = Vec::new();
        let opts = ConvertOptions::default();
        let records = vec![
            record(1, 0, "Root", Some("Children")),
            record(2, 1, "A", Some("Kids")),
            record(3, 2, "A1", None),
            record(4, 1, "B", None),
        ];
        let mut builder = TreeBuilder::new(records, &opts, &mut warnings);
        let a = builder.attach(1, 3).unwrap();
        assert_eq!(a.display_label(), "A");
        assert_eq!(labels(&a.children), vec!["A1"]);
    }
}
