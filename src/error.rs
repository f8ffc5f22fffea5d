//! Error types for the ACH encoder.

use thiserror::Error;

/// Result type alias for encoder operations
pub type Result<T> = std::result::Result<T, AchError>;

/// Errors that can occur while building an ACH file.
#[derive(Error, Debug)]
pub enum AchError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A transaction or configuration field violates its width/format rules
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A numeric value does not fit its fixed-width slot
    #[error("Value {value} does not fit the {width}-character {field} field")]
    FieldOverflow {
        field: &'static str,
        width: usize,
        value: u64,
    },

    /// No transactions were supplied
    #[error("Cannot generate an ACH file from an empty batch")]
    EmptyBatch,

    /// Invalid transaction row in the input file
    #[error("Invalid transaction at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: ach-encoder <input.csv> [output]")]
    MissingArgument,
}

impl AchError {
    /// Shorthand for building a [`AchError::Validation`].
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AchError::Validation {
            field,
            message: message.into(),
        }
    }
}
