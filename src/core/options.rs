//! Conversion options

use serde::{Deserialize, Serialize};

/// Options controlling how rows are turned into a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Fail on irregular input instead of recovering and warning.
    /// Default: false
    pub strict: bool,

    /// Character that splits a value cell into a list; `None` keeps
    /// every value as plain text.
    /// Default: `Some(',')`
    pub list_separator: Option<char>,

    /// Keep empty tokens when splitting (`"a,,b"` gives three items)
    /// Default: true
    pub keep_empty_list_items: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            strict: false,
            list_separator: Some(','),
            keep_empty_list_items: true,
        }
    }
}

impl ConvertOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject malformed rows and unreachable records
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Options that never split value cells
    pub fn text_only() -> Self {
        Self {
            list_separator: None,
            ..Self::default()
        }
    }

    pub fn with_list_separator(mut self, separator: Option<char>) -> Self {
        self.list_separator = separator;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ConvertOptions::default();
        assert!(!opts.strict);
        assert_eq!(opts.list_separator, Some(','));
        assert!(opts.keep_empty_list_items);
    }

    #[test]
    fn test_presets() {
        assert!(ConvertOptions::strict().strict);
        assert_eq!(ConvertOptions::text_only().list_separator, None);
        assert_eq!(
            ConvertOptions::new().with_list_separator(Some(';')).list_separator,
            Some(';')
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let opts: ConvertOptions = serde_json::from_str(r#"{"strict": true}"#).unwrap();
        assert!(opts.strict);
        assert_eq!(opts.list_separator, Some(','));
    }
}
