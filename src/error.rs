//! Error types for the slipgrid crate

use thiserror::Error;

/// Main error type for the slipgrid crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("grid has no rows")]
    EmptyGrid,

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid cell character '{character}' at row {row}, column {col}")]
    InvalidCellCharacter {
        character: char,
        row: usize,
        col: usize,
    },

    #[error("grid has more than one start cell (indices {first} and {second})")]
    MultipleStartCells { first: usize, second: usize },

    #[error("slip probability {value} must be within [0.0, 1.0]")]
    InvalidSlipProbability { value: f64 },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
