//! Error types for the spense-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the spense library.
#[derive(Error, Debug)]
pub enum SpenseError {
    /// OCR text extraction error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Language-model extraction error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Ledger store error.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A collaborator failed to initialize at startup. Rendered behind a
    /// "Setup error" prefix at the operation boundary.
    #[error("{0}")]
    Setup(String),
}

/// Errors related to OCR text extraction.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The input image does not exist.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text extraction failed.
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// Invalid image format or content.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to the language-model call and its output.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Transport-level failure talking to the model service.
    #[error("request failed: {0}")]
    Request(String),

    /// The model service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Service { status: u16, body: String },

    /// The model response contained no parseable JSON. Carries the
    /// verbatim response text for diagnostics.
    #[error("unparseable model output: {source}")]
    MalformedOutput {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors related to the tabular ledger store.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Appending rows to the store failed.
    #[error("failed to append rows: {0}")]
    Persist(String),

    /// Reading the store back failed.
    #[error("failed to read ledger: {0}")]
    Read(String),
}

/// Result type for the spense library.
pub type Result<T> = std::result::Result<T, SpenseError>;
