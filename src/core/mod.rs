//! Row-to-tree reconstruction
//!
//! The pipeline runs four stages, each over the full output of the previous:
//! - `classify`: depth, label and value of every row, or separator
//! - `group`: merge consecutive rows into records, split at separators
//! - `build`: nest records under their parents by depth
//! - `finalize`: drop depth/children-label bookkeeping
//!
//! ```text
//! rows -> ClassifiedRow* -> Record* -> Record (tree) -> Node
//! ```

pub mod build;
pub mod classify;
pub mod finalize;
pub mod group;
pub mod node;
pub mod options;
pub mod record;


use tracing::debug;

pub use build::{build_tree, TreeBuilder};
pub use classify::{classify_row, classify_rows, ClassifiedRow, RowKind};
pub use finalize::Finalize;
pub use group::group_rows;
pub use node::{Children, Node};
pub use options::ConvertOptions;
pub use record::{InputRow, Record, Row, SourceRow, Value};

use crate::utils::diagnostics::{CheckResult, Diagnostic};
use crate::utils::error::{TreeError, TreeResult};

/// Converted tree with any warnings collected on the way
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// Root of the converted tree
    pub tree: Node,
    /// Non-fatal findings
    pub warnings: Vec<Diagnostic>,
}

impl ConversionOutput {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run classify, group and build, stopping before bookkeeping is removed.
///
/// The returned record still carries each node's depth, which makes it
/// the place to inspect how rows were nested.
pub fn build_records<R: InputRow>(
    rows: &[R],
    options: &ConvertOptions,
    warnings: &mut Vec<Diagnostic>,
) -> TreeResult<Record> {
    if rows.is_empty() {
        return Err(TreeError::EmptyInput);
    }

    let classified = classify_rows(rows, options, warnings)?;
    let records = group_rows(classified, warnings);
    build_tree(records, options, warnings)
}

/// Convert rows into a tree, keeping warnings
pub fn convert_rows_with_diagnostics<R: InputRow>(
    rows: &[R],
    options: &ConvertOptions,
) -> TreeResult<ConversionOutput> {
    let mut warnings = Vec::new();
    let root = build_records(rows, options, &mut warnings)?;
    let tree = root.finalize();

    debug!(
        rows = rows.len(),
        nodes = tree.count_nodes(),
        warnings = warnings.len(),
        "converted rows"
    );
    Ok(ConversionOutput { tree, warnings })
}

/// Convert rows into a tree with custom options
pub fn convert_rows_with_options<R: InputRow>(
    rows: &[R],
    options: &ConvertOptions,
) -> TreeResult<Node> {
    convert_rows_with_diagnostics(rows, options).map(|out| out.tree)
}

/// Convert rows into a tree with default options
pub fn convert_rows<R: InputRow>(rows: &[R]) -> TreeResult<Node> {
    convert_rows_with_options(rows, &ConvertOptions::default())
}

/// Run the pipeline for its findings only.
///
/// A conversion failure shows up as a single error diagnostic.
pub fn check_rows<R: InputRow>(rows: &[R], options: &ConvertOptions) -> CheckResult {
    let mut warnings = Vec::new();
    if let Err(err) = build_records(rows, options, &mut warnings) {
        warnings.push(Diagnostic::from(&err));
    }
    CheckResult::from(warnings)
}
