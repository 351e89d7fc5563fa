//! Error types for the imgsift library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`SiftError`] — **Fatal** for the operation that raised it: the batch
//!   cannot start (missing input folder, no credential) or a whole document
//!   cannot be opened. Returned as `Err(SiftError)` from the top-level entry
//!   points.
//!
//! * [`ItemError`] — **Non-fatal**: a single file or embedded image failed
//!   (unreadable bytes, a model call that errored, a corrupt image stream).
//!   Caught at the per-item boundary, logged with the offending name, and the
//!   batch continues with the next item.
//!
//! The separation keeps the partial-failure contract explicit: one bad file
//! never aborts a batch, while a bad batch setup always does.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the imgsift library.
///
/// Per-item failures use [`ItemError`] and are handled at the loop boundary
/// rather than propagated here.
#[derive(Debug, Error)]
pub enum SiftError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input folder does not exist.
    #[error("input folder not found: '{path}'\nCheck the path exists and is readable.")]
    InputDirNotFound { path: PathBuf },

    /// The input path exists but is not a directory.
    #[error("input path is not a folder: '{path}'")]
    NotADirectory { path: PathBuf },

    /// Could not read a directory listing.
    #[error("failed to list folder '{path}': {source}")]
    ListDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create the output directory.
    #[error("failed to create output folder '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Classifier errors ─────────────────────────────────────────────────
    /// No API key was supplied and no pre-built model was injected.
    #[error("no API key configured for the vision endpoint.\nPass one explicitly, e.g. via --api-key or SAMBANOVA_API_KEY.")]
    MissingApiKey,

    /// The HTTP client for the vision endpoint could not be constructed.
    #[error("failed to build HTTP client for '{base_url}': {reason}")]
    HttpClientFailed { base_url: String, reason: String },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// pdfium could not open a document. Fatal for that document only; the
    /// directory sweep records it and moves on.
    #[error("failed to open PDF '{path}': {detail}")]
    PdfOpenFailed { path: PathBuf, detail: String },

    /// The PDF path has no usable file stem to name the output folder after.
    #[error("cannot derive an output folder name from '{path}'")]
    NoFileStem { path: PathBuf },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single file or embedded image.
///
/// Logged at the per-item boundary; the surrounding batch continues.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The image file could not be read from disk.
    #[error("failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The vision endpoint call failed in transport or parsing.
    #[error("vision model call failed: {reason}")]
    ModelCall { reason: String },

    /// Copying a meaningful image into the output folder failed.
    #[error("failed to copy '{path}': {source}")]
    CopyFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An embedded image could not be decoded.
    #[error("page {page} image {index}: decode failed: {detail}")]
    DecodeFailed {
        page: usize,
        index: usize,
        detail: String,
    },

    /// Writing a transformed image to disk failed.
    #[error("failed to save '{path}': {detail}")]
    SaveFailed { path: PathBuf, detail: String },
}
