//! Error types for the explorer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a city dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The city's file does not exist
    #[error("Dataset not found: {path}")]
    MissingFile { path: PathBuf },

    /// Column count matches neither the basic nor the extended layout
    #[error("Unsupported layout in {path}: expected 6 or 8 data columns, found {columns}")]
    UnsupportedLayout { path: PathBuf, columns: usize },

    /// A data row could not be parsed
    #[error("Row {row}: {reason}")]
    BadRow { row: usize, reason: String },
}

/// Ways a prompt can end other than with an accepted answer.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The user typed the exit keyword, or input was closed
    #[error("exit requested")]
    ExitRequested,

    /// An accepted answer that names none of the offered options
    #[error("'{0}' is not one of the offered options")]
    UnknownChoice(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
