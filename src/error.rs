//! Error types for pdfstructure.

use std::io;
use thiserror::Error;

/// Result type alias for pdfstructure operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing document structure.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a span record stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The span record stream is not valid JSON or misses required fields.
    #[error("Invalid span records: {0}")]
    Json(#[from] serde_json::Error),

    /// A page edge other than "top" or "bottom" was requested.
    #[error("Unrecognised edge {0:?}, should be \"top\" or \"bottom\"")]
    UnrecognizedEdge(String),

    /// A scan granularity other than "block" or "line" was requested.
    #[error("Unrecognised granularity {0:?}, should be \"block\" or \"line\"")]
    UnrecognizedGranularity(String),

    /// A removal loop kept finding work after the iteration cap.
    #[error("{stage} did not reach a fixed point after {iterations} iterations")]
    FixedPointNotReached {
        /// Name of the loop that was cut off
        stage: String,
        /// Number of iterations performed
        iterations: usize,
    },

    /// Error during rendering of the derived views.
    #[error("Rendering error: {0}")]
    Render(String),
}
