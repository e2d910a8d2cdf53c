//! Result types returned by a conversion.
//!
//! A [`ConversionOutput`] is an immutable record of one run: everything the
//! presentation layer needs (preview, download name, Markdown to copy) in one
//! value, instead of a set of mutable globals updated piecemeal.

use serde::{Deserialize, Serialize};

/// Everything produced by converting one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Note title (filename without its trailing `.pdf`).
    pub title: String,
    /// Name of the source file as selected.
    pub source_name: String,
    /// Suggested name for the downloaded Markdown: `<title>.md`.
    pub download_name: String,
    /// The generated note.
    pub markdown: String,
    /// HTML preview of `markdown`, when rendering was enabled.
    pub html: Option<String>,
    pub stats: ConversionStats,
}

/// Counters for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Size of the input file in bytes.
    pub source_bytes: usize,
    /// `( … )` literal runs matched. Zero means the raw-text fallback was used.
    pub literal_runs: usize,
    /// Characters of extracted text.
    pub extracted_chars: usize,
    /// Paragraphs written to the overview.
    pub paragraphs_kept: usize,
    /// Paragraphs left out as too short.
    pub paragraphs_dropped: usize,
    /// Wall-clock time of the in-memory pipeline.
    pub duration_ms: u64,
}
