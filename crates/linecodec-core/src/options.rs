//! Parse configuration.

use serde::{Deserialize, Serialize};

/// Options controlling one parse call. Immutable once handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Field separator character.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Drop the first raw line before mapping.
    #[serde(default)]
    pub skip_header_line: bool,

    /// Trim whitespace from each split segment. Whitespace-only segments
    /// trim to empty, never to a missing value.
    #[serde(default = "bool_true")]
    pub trim_field_values: bool,

    /// Keep blank lines (they become structural-error records) instead of
    /// dropping them before mapping.
    #[serde(default = "bool_true")]
    pub include_empty_lines: bool,

    /// Early-termination threshold: stop scheduling new lines once this many
    /// completed records carry errors. `None` = unlimited.
    #[serde(default)]
    pub max_errors: Option<usize>,

    /// Chunk size for parallel/async scheduling and streaming reads.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_delimiter() -> char {
    ','
}

fn bool_true() -> bool {
    true
}

fn default_buffer_size() -> usize {
    1_024
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            skip_header_line: false,
            trim_field_values: true,
            include_empty_lines: true,
            max_errors: None,
            buffer_size: 1_024,
        }
    }
}

impl ParseOptions {
    /// Options with a specific delimiter, defaults otherwise.
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.delimiter, ',');
        assert!(!options.skip_header_line);
        assert!(options.trim_field_values);
        assert!(options.include_empty_lines);
        assert_eq!(options.max_errors, None);
        assert_eq!(options.buffer_size, 1_024);
    }

    #[test]
    fn with_delimiter_keeps_other_defaults() {
        let options = ParseOptions::with_delimiter('|');
        assert_eq!(options.delimiter, '|');
        assert!(options.trim_field_values);
    }

    #[test]
    fn empty_json_deserializes_to_defaults() {
        let options: ParseOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ParseOptions::default());
    }

    #[test]
    fn serde_roundtrip() {
        let options = ParseOptions {
            delimiter: '|',
            skip_header_line: true,
            max_errors: Some(5),
            ..ParseOptions::default()
        };
        let json = serde_json::to_string(&options).unwrap();
        let back: ParseOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, back);
    }
}
