//! Error types for the LineCodec parse pipeline.

use thiserror::Error;

/// Errors from converting a single raw field value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("invalid enum value")]
    InvalidEnumValue,

    #[error("no enum variant with ordinal {ordinal}")]
    UnknownOrdinal { ordinal: i64 },

    #[error("no enum variant named '{name}'")]
    UnknownVariant { name: String },

    #[error("invalid {target} value '{raw}': {reason}")]
    InvalidValue {
        target: &'static str,
        raw: String,
        reason: String,
    },

    #[error("no value at index {index}")]
    MissingValue { index: usize },

    #[error("{0}")]
    Other(String),
}

/// Whole-line failures that stop a line's mapping before any field conversion.
/// Exactly one of these is attached to the affected record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("invalid line format - not delimiter-separated")]
    NotDelimited,

    #[error("no column declarations for type {type_name}")]
    NoColumns { type_name: &'static str },

    #[error("invalid line format - column count mismatch (expected {expected}, found {found})")]
    ColumnCountMismatch { expected: usize, found: usize },
}

/// Failures from collaborators outside the engine's control (I/O, decoding).
/// Malformed line content never produces one of these — it surfaces as data
/// on the affected records instead.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
