//! Error types for the pdf2note library.
//!
//! There is a single fatal error type, [`Pdf2NoteError`]. Extraction itself
//! never fails (undecodable bytes become replacement characters and a
//! document without text literals simply yields little or no text), so every
//! variant here describes a problem *around* the pipeline: the wrong kind of
//! file, an unreadable path, an unwritable output, or a bad configuration.
//!
//! User-facing wording lives in [`crate::template::Template`]; the `Display`
//! impls below are the developer-facing messages that end up in logs and in
//! the `<err>` slot of the localized failure message.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2note library.
#[derive(Debug, Error)]
pub enum Pdf2NoteError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The selected file is not `application/pdf`. No conversion was attempted.
    #[error("'{name}' is not a PDF (media type: {media_type})")]
    NotAPdf { name: String, media_type: String },

    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but could not be read into memory.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Pdf2NoteError {
    /// True when the error is the input-type rejection rather than a failure
    /// during an attempted conversion.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Pdf2NoteError::NotAPdf { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_pdf_display() {
        let e = Pdf2NoteError::NotAPdf {
            name: "notes.txt".into(),
            media_type: "text/plain".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"), "got: {msg}");
        assert!(msg.contains("text/plain"), "got: {msg}");
        assert!(e.is_rejection());
    }

    #[test]
    fn read_failed_keeps_source() {
        use std::error::Error as _;
        let e = Pdf2NoteError::ReadFailed {
            path: PathBuf::from("/tmp/a.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
        };
        assert!(e.to_string().contains("disk on fire"));
        assert!(e.source().is_some());
        assert!(!e.is_rejection());
    }

    #[test]
    fn invalid_config_display() {
        let e = Pdf2NoteError::InvalidConfig("bad date format".into());
        assert_eq!(e.to_string(), "Invalid configuration: bad date format");
    }
}
