//! # rowtree
//!
//! Rebuild nested key/value trees from indentation-encoded spreadsheet rows.
//!
//! A spreadsheet export describes a tree one row per entry. The number of
//! leading empty cells is the row's depth, the first non-empty cell is a
//! label and the cell after it is the label's value. An all-empty row ends
//! one record and starts the next. A label with no value names the key
//! under which the record's children (the following records one level
//! deeper) are nested.
//!
//! ## Features
//!
//! - **Depth-based nesting**: children are found by indentation, any number of levels deep
//! - **Lists**: value cells containing commas become lists of trimmed strings
//! - **Ordered output**: keys keep the order of their source rows
//! - **Diagnostics**: irregular input is repaired and reported, or rejected in strict mode
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ```rust
//! use rowtree::{csv_to_json, csv_to_tree};
//!
//! let csv = "Root,name,,\nChildren,,,\n,,,\n,Child1,name,\n";
//!
//! let tree = csv_to_tree(csv).unwrap();
//! assert_eq!(tree.child_nodes().len(), 1);
//!
//! let json = csv_to_json(csv).unwrap();
//! assert_eq!(json, r#"{"Root":"name","Children":[{"Child1":"name"}]}"#);
//! ```
//!
//! Rows that are already in memory skip the CSV reader:
//!
//! ```rust
//! use rowtree::{convert_rows, TreeError};
//!
//! let rows: Vec<Vec<String>> = Vec::new();
//! assert_eq!(convert_rows(&rows).unwrap_err(), TreeError::EmptyInput);
//! ```

/// Core reconstruction pipeline
pub mod core;

/// CSV reading and tree serialization
pub mod io;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core conversion functions
pub use core::{
    build_records, check_rows, convert_rows, convert_rows_with_diagnostics,
    convert_rows_with_options, Children, ConversionOutput, ConvertOptions, Finalize, InputRow,
    Node, Record, Row, SourceRow, Value,
};

// Re-export reading and writing
pub use io::{
    read_rows, read_rows_from_bytes, read_rows_from_path, read_rows_from_str, to_json,
    to_json_pretty, write_json, OutputFormat, ReaderOptions,
};

#[cfg(feature = "yaml")]
pub use io::to_yaml;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{TreeError, TreeResult};

/// Parse CSV text and convert it into a tree with default options
pub fn csv_to_tree(input: &str) -> TreeResult<Node> {
    csv_to_tree_with_options(input, &ReaderOptions::default(), &ConvertOptions::default())
}

/// Parse CSV text and convert it into a tree with custom options
pub fn csv_to_tree_with_options(
    input: &str,
    reader: &ReaderOptions,
    options: &ConvertOptions,
) -> TreeResult<Node> {
    let rows = read_rows_from_str(input, reader)?;
    convert_rows_with_options(&rows, options)
}

/// Parse CSV text and convert it into a tree, keeping warnings
pub fn csv_to_tree_with_diagnostics(
    input: &str,
    reader: &ReaderOptions,
    options: &ConvertOptions,
) -> TreeResult<ConversionOutput> {
    let rows = read_rows_from_str(input, reader)?;
    convert_rows_with_diagnostics(&rows, options)
}

/// Parse CSV text and return the tree as compact JSON
pub fn csv_to_json(input: &str) -> TreeResult<String> {
    to_json(&csv_to_tree(input)?)
}
