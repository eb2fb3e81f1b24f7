//! Error types for the roster data model.

use thiserror::Error;

/// Errors raised when parsing model identifiers from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Table column name not recognized.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Filter field name not recognized.
    #[error("unknown filter field: {0} (expected state, board, gender, or category)")]
    UnknownFilterField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
