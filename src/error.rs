//! Error types for unoutline library.

use std::io;
use thiserror::Error;

/// Result type alias for unoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during outline inference.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input or output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is neither a fragment list, page chunks, nor markdown.
    #[error("Unknown input format: {0}")]
    UnknownInput(String),

    /// A fragment violates the extraction contract.
    #[error("Invalid fragment: {0}")]
    InvalidFragment(String),

    /// The document source could not be opened.
    #[error("Cannot open document: {0}")]
    SourceOpen(String),

    /// Extracting a single page failed.
    #[error("Failed to extract page {page}: {reason}")]
    PageExtract {
        /// Page number (1-indexed)
        page: u32,
        /// Failure description
        reason: String,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
