//! Python bindings for rowtree

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use rowtree::{csv_to_tree_with_options, ConvertOptions, OutputFormat, ReaderOptions};

/// Convert CSV text into a JSON tree string.
#[pyfunction]
#[pyo3(signature = (input, pretty = false, strict = false, split_lists = true))]
fn convert(input: &str, pretty: bool, strict: bool, split_lists: bool) -> PyResult<String> {
    let mut options = if strict {
        ConvertOptions::strict()
    } else {
        ConvertOptions::default()
    };
    if !split_lists {
        options = options.with_list_separator(None);
    }

    let format = if pretty {
        OutputFormat::JsonPretty
    } else {
        OutputFormat::Json
    };

    csv_to_tree_with_options(input, &ReaderOptions::default(), &options)
        .and_then(|tree| format.render(&tree))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Convert rows that are already split into cells.
#[pyfunction]
#[pyo3(signature = (rows, pretty = false, strict = false))]
fn convert_rows(rows: Vec<Vec<String>>, pretty: bool, strict: bool) -> PyResult<String> {
    let options = if strict {
        ConvertOptions::strict()
    } else {
        ConvertOptions::default()
    };
    let format = if pretty {
        OutputFormat::JsonPretty
    } else {
        OutputFormat::Json
    };

    rowtree::convert_rows_with_options(&rows, &options)
        .and_then(|tree| format.render(&tree))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(convert, m)?)?;
    m.add_function(wrap_pyfunction!(convert_rows, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
