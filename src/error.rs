//! Error types shared by the matrix, layer and network code.

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Operand dimensions violate the algebraic precondition of `op`.
    #[error("shape mismatch in {op}: expected {expected:?}, found {found:?}")]
    Shape {
        op: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Element, row or column access outside the matrix bounds.
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    Index {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Invalid construction or training arguments.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Malformed dataset content.
    #[error("invalid data: {0}")]
    Data(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn shape(op: &'static str, expected: (usize, usize), found: (usize, usize)) -> Self {
        Error::Shape { op, expected, found }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
