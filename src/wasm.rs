//! WASM bindings for rowtree
//!
//! This module provides JavaScript-accessible functions for CSV → tree conversion.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::core::ConvertOptions;
use crate::diagnostics::DiagnosticLevel;
use crate::io::{OutputFormat, ReaderOptions};
use crate::utils::error::TreeResult;

/// Conversion options (exposed to WASM)
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct WasmConvertOptions {
    /// Indent the JSON output
    pub pretty: bool,
    /// Reject irregular input instead of repairing it
    pub strict: bool,
    /// Split comma-separated value cells into lists
    pub split_lists: bool,
    /// Field delimiter, a single ASCII character
    pub delimiter: String,
}

impl Default for WasmConvertOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            strict: false,
            split_lists: true,
            delimiter: ",".to_string(),
        }
    }
}

impl WasmConvertOptions {
    fn reader_options(&self) -> TreeResult<ReaderOptions> {
        let delimiter = ReaderOptions::parse_delimiter(&self.delimiter)?;
        Ok(ReaderOptions::default().with_delimiter(delimiter))
    }

    fn convert_options(&self) -> ConvertOptions {
        let options = ConvertOptions {
            strict: self.strict,
            ..ConvertOptions::default()
        };
        if self.split_lists {
            options
        } else {
            options.with_list_separator(None)
        }
    }
}

/// Conversion result with additional metadata
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The JSON output
    pub output: String,
    /// Whether the conversion was successful
    pub success: bool,
    /// Error message if conversion failed
    pub error: Option<String>,
    /// Warnings during conversion
    pub warnings: Vec<String>,
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert CSV text to a JSON tree with default options
#[wasm_bindgen(js_name = "csvToJson")]
pub fn csv_to_json_wasm(input: &str) -> Result<String, JsValue> {
    crate::csv_to_json(input).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert CSV text to a JSON tree with options
#[wasm_bindgen(js_name = "convert")]
pub fn convert_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: WasmConvertOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    let format = if opts.pretty {
        OutputFormat::JsonPretty
    } else {
        OutputFormat::Json
    };

    let result = opts
        .reader_options()
        .and_then(|reader| {
            crate::csv_to_tree_with_diagnostics(input, &reader, &opts.convert_options())
        })
        .and_then(|out| Ok((format.render(&out.tree)?, out.warnings)));

    let result = match result {
        Ok((output, warnings)) => ConvertResult {
            output,
            success: true,
            error: None,
            warnings: warnings.iter().map(|w| w.to_string()).collect(),
        },
        Err(e) => ConvertResult {
            output: String::new(),
            success: false,
            error: Some(e.to_string()),
            warnings: vec![],
        },
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Check CSV text for irregular rows without converting
#[wasm_bindgen(js_name = "check")]
pub fn check_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: WasmConvertOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();

    let rows = opts
        .reader_options()
        .and_then(|reader| crate::read_rows_from_str(input, &reader));
    let result = match rows {
        Ok(rows) => crate::check_rows(&rows, &opts.convert_options()),
        Err(e) => crate::diagnostics::CheckResult::from(vec![
            crate::diagnostics::Diagnostic::from(&e),
        ]),
    };

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for d in &result.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.to_string()),
            DiagnosticLevel::Warning => warnings.push(d.to_string()),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        has_errors: result.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Summary of check results
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub has_errors: bool,
}

/// Get version information
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TreeError;

    fn with_delimiter(delimiter: &str) -> WasmConvertOptions {
        WasmConvertOptions {
            delimiter: delimiter.to_string(),
            ..WasmConvertOptions::default()
        }
    }

    #[test]
    fn test_default_delimiter_is_comma() {
        let reader = WasmConvertOptions::default().reader_options().unwrap();
        assert_eq!(reader.delimiter, b',');
    }

    #[test]
    fn test_delimiter_must_be_one_ascii_character() {
        assert_eq!(with_delimiter(";").reader_options().unwrap().delimiter, b';');
        for bad in ["", "§", "ab"] {
            assert!(matches!(
                with_delimiter(bad).reader_options(),
                Err(TreeError::InvalidDelimiter { .. })
            ));
        }
    }
}
