//! Conversion diagnostics
//!
//! Non-fatal findings gathered while rebuilding a tree. In lenient mode
//! the pipeline recovers from irregular input and records what it did
//! here; in strict mode the same conditions become [`TreeError`]s.
//!
//! ## Example
//!
//! ```rust
//! use rowtree::diagnostics::DiagnosticLevel;
//! use rowtree::check_rows;
//!
//! let rows = vec![vec!["Root".to_string(), "".to_string()]];
//! let result = check_rows(&rows, &Default::default());
//! assert_eq!(result.warnings, 1);
//! assert!(result.diagnostics.iter().all(|d| d.level == DiagnosticLevel::Warning));
//! ```
//!
//! [`TreeError`]: crate::TreeError

use std::fmt;

use crate::utils::error::TreeError;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Warning - the output was produced but may not be what the author meant
    Warning,
    /// Error - the conversion failed
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Source line (1-indexed)
    pub line: Option<usize>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            suggestion: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    /// Add location information
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&TreeError> for Diagnostic {
    fn from(err: &TreeError) -> Self {
        let diag = Diagnostic::new(DiagnosticLevel::Error, err.to_string());
        match err.line() {
            Some(line) => diag.at_line(line),
            None => diag,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> line N
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        if let Some(line) = self.line {
            write!(f, "\n  --> line {}", line)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default, Clone)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(plural(self.errors, "error"));
        }
        if self.warnings > 0 {
            parts.push(plural(self.warnings, "warning"));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl From<Vec<Diagnostic>> for CheckResult {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        let mut result = CheckResult::new();
        for diag in diagnostics {
            result.add(diag);
        }
        result
    }
}

fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

/// Render a check result as a human-readable report
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        let (color, reset) = if use_color {
            let code = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",
                DiagnosticLevel::Warning => "\x1b[33m",
            };
            (code, "\x1b[0m")
        } else {
            ("", "")
        };

        output.push_str(&format!("{}{}{}: {}\n", color, diag.level, reset, diag.message));
        if let Some(line) = diag.line {
            output.push_str(&format!("  --> line {}\n", line));
        }
        if let Some(ref suggestion) = diag.suggestion {
            output.push_str(&format!("  = help: {}\n", suggestion));
        }
        output.push('\n');
    }

    output.push_str(&result.summary());
    output
}
