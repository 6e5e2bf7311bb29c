//! User-facing error message rendering.

use crate::error::{ConvertError, StructuralError};

/// Immutable catalog of error message formats, injected into the engine so
/// embedders can adjust message shape without process-wide format state.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    /// Prefix record errors with the 1-based line number.
    pub line_numbers: bool,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self { line_numbers: true }
    }
}

impl MessageCatalog {
    /// Render a whole-line failure. `line_no` is 0-based.
    pub fn structural(&self, line_no: usize, error: &StructuralError) -> String {
        if self.line_numbers {
            format!("line {}: {}", line_no + 1, error)
        } else {
            error.to_string()
        }
    }

    /// Render a single-field conversion failure.
    pub fn field_failure(&self, line_no: usize, field: &str, error: &ConvertError) -> String {
        if self.line_numbers {
            format!("line {}: field '{}' failed: {}", line_no + 1, field, error)
        } else {
            format!("field '{}' failed: {}", field, error)
        }
    }

    /// Batch-scoped notice for the `max_errors` cutoff.
    pub fn max_errors_reached(&self, threshold: usize, unprocessed: usize) -> String {
        format!("stopped after {threshold} records with errors; {unprocessed} lines not processed")
    }

    /// Batch-scoped notice for cooperative cancellation.
    pub fn cancelled(&self, unprocessed: usize) -> String {
        format!("parse cancelled; {unprocessed} lines not processed")
    }
}
