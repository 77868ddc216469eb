//! Input and output around the core pipeline
//!
//! - `reader`: CSV text to rows
//! - `writer`: trees to JSON (and YAML with the `yaml` feature)

pub mod reader;
pub mod writer;

pub use reader::{
    read_rows, read_rows_from_bytes, read_rows_from_path, read_rows_from_str, ReaderOptions,
};
pub use writer::{to_json, to_json_pretty, write_json, OutputFormat};

#[cfg(feature = "yaml")]
pub use writer::to_yaml;
