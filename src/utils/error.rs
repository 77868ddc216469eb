//! Error handling for rowtree conversions
//!
//! This module provides a unified error type and result type for row
//! loading, tree reconstruction and output encoding.

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No rows were supplied, so there is no root record
    EmptyInput,
    /// A content row has no cell at `depth + 1` (strict mode only)
    MalformedRow {
        line: usize,
        depth: usize,
        width: usize,
    },
    /// Record depths do not form the expected parent/child pattern (strict mode only)
    InconsistentDepth {
        line: usize,
        label: String,
        message: String,
    },
    /// Row tokenization failed
    Csv {
        message: String,
        line: Option<u64>,
    },
    /// Delimiter is not a single ASCII character usable as a field separator
    InvalidDelimiter { delimiter: String },
    /// IO error (for file operations)
    Io { message: String },
    /// Output encoding failed
    Serialize { message: String },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::EmptyInput => write!(f, "Empty input: no rows to build a tree from"),
            TreeError::MalformedRow { line, depth, width } => write!(
                f,
                "Malformed row at line {}: label at column {} needs a value column, but the row has only {} cell(s)",
                line,
                depth + 1,
                width
            ),
            TreeError::InconsistentDepth {
                line,
                label,
                message,
            } => {
                if label.is_empty() {
                    write!(f, "Inconsistent depth at line {}: {}", line, message)
                } else {
                    write!(
                        f,
                        "Inconsistent depth at line {} ('{}'): {}",
                        line, label, message
                    )
                }
            }
            TreeError::Csv { message, line } => {
                if let Some(l) = line {
                    write!(f, "CSV error at line {}: {}", l, message)
                } else {
                    write!(f, "CSV error: {}", message)
                }
            }
            TreeError::InvalidDelimiter { delimiter } => write!(
                f,
                "Invalid delimiter {:?}: expected one ASCII character other than a quote or line break",
                delimiter
            ),
            TreeError::Io { message } => write!(f, "IO error: {}", message),
            TreeError::Serialize { message } => write!(f, "Serialization error: {}", message),
        }
    }
}

impl std::error::Error for TreeError {}

impl From<std::io::Error> for TreeError {
    fn from(err: std::io::Error) -> Self {
        TreeError::Io {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for TreeError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        if let csv::ErrorKind::Io(io) = err.kind() {
            return TreeError::Io {
                message: io.to_string(),
            };
        }
        TreeError::Csv {
            message: err.to_string(),
            line,
        }
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        TreeError::Serialize {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for TreeError {
    fn from(err: serde_yaml::Error) -> Self {
        TreeError::Serialize {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type TreeResult<T> = Result<T, TreeError>;

// Convenience constructors for errors
impl TreeError {
    pub fn malformed(line: usize, depth: usize, width: usize) -> Self {
        TreeError::MalformedRow { line, depth, width }
    }

    pub fn inconsistent(line: usize, label: impl Into<String>, message: impl Into<String>) -> Self {
        TreeError::InconsistentDepth {
            line,
            label: label.into(),
            message: message.into(),
        }
    }

    /// Source line the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            TreeError::MalformedRow { line, .. } | TreeError::InconsistentDepth { line, .. } => {
                Some(*line)
            }
            TreeError::Csv { line, .. } => line.map(|l| l as usize),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        let err = TreeError::EmptyInput;
        assert!(err.to_string().contains("Empty input"));
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_malformed_row_display() {
        let err = TreeError::malformed(7, 3, 4);
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("column 4"));
        assert!(msg.contains("4 cell(s)"));
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_inconsistent_depth_display() {
        let err = TreeError::inconsistent(2, "Children", "no child records at depth 1");
        let msg = err.to_string();
        assert!(msg.contains("line 2"));
        assert!(msg.contains("'Children'"));
        assert!(msg.contains("depth 1"));

        let err = TreeError::inconsistent(5, "", "unreachable record");
        assert!(!err.to_string().contains("''"));
    }

    #[test]
    fn test_invalid_delimiter_display() {
        let err = TreeError::InvalidDelimiter {
            delimiter: "§".to_string(),
        };
        assert!(err.to_string().contains("\"§\""));
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: TreeError = io.into();
        assert!(matches!(err, TreeError::Io { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }
}
