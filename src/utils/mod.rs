//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics and warning reports
//! - Error types and result types

pub mod diagnostics;
pub mod error;

// Re-export commonly used items
pub use diagnostics::{format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel};
pub use error::{TreeError, TreeResult};
