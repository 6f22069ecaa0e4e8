//! Validation errors for ledger and directory operations.

use thiserror::Error;

/// Errors raised when an edit cannot be applied.
///
/// None of these are fatal: the state is left untouched and the caller
/// decides whether to show or ignore the message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Index {index} out of range for {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown unit: {0} (expected 'ml' or 'oz')")]
    UnknownUnit(String),
}
