//! Markdown formatting: extracted text → a fixed-shape note.
//!
//! The note always has the same skeleton (title, date/source blockquote,
//! overview, empty notes and links sections, attribution). Only the title and
//! the overview paragraphs come from the document. Nothing is escaped: a `#`
//! or `*` in the extracted text passes straight through into the Markdown.

use crate::error::Pdf2NoteError;
use crate::template::Template;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write as _;
use tracing::debug;

static RE_PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// Paragraphs of a text after the short-fragment filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraphs {
    /// Trimmed paragraphs longer than the threshold, in order.
    pub kept: Vec<String>,
    /// How many non-empty paragraphs were filtered out as too short.
    pub dropped: usize,
}

/// Title of the note: the filename without a trailing `.pdf`.
pub fn derive_title(filename: &str) -> &str {
    filename.strip_suffix(".pdf").unwrap_or(filename)
}

/// Name of the downloadable Markdown file: `<title>.md`.
pub fn download_name(filename: &str) -> String {
    format!("{}.md", derive_title(filename))
}

/// Split `text` on runs of newlines and keep the paragraphs whose trimmed
/// length is greater than `min_chars` characters.
pub fn split_paragraphs(text: &str, min_chars: usize) -> Paragraphs {
    let mut out = Paragraphs::default();
    for para in RE_PARAGRAPH_BREAK.split(text) {
        let cleaned = para.trim();
        if cleaned.is_empty() {
            continue;
        }
        if cleaned.chars().count() > min_chars {
            out.kept.push(cleaned.to_string());
        } else {
            out.dropped += 1;
        }
    }
    out
}

/// Build the note for `text` extracted from `filename`.
///
/// `date` is already formatted; see [`format_date`].
pub fn format_markdown(
    text: &str,
    filename: &str,
    date: &str,
    min_chars: usize,
    template: &Template,
) -> String {
    let paragraphs = split_paragraphs(text, min_chars);
    render_note(&paragraphs.kept, filename, date, template)
}

/// [`format_markdown`] with today's local date in `date_format`.
pub fn format_markdown_today(
    text: &str,
    filename: &str,
    date_format: &str,
    min_chars: usize,
    template: &Template,
) -> Result<String, Pdf2NoteError> {
    let date = format_date(today(), date_format)?;
    Ok(format_markdown(text, filename, &date, min_chars, template))
}

/// Today's date on the local clock.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Format `date` with a `strftime` pattern.
///
/// Fails with [`Pdf2NoteError::InvalidConfig`] when the pattern asks for
/// something a calendar date does not carry, such as `%H` or `%z`.
pub fn format_date(date: NaiveDate, date_format: &str) -> Result<String, Pdf2NoteError> {
    let mut out = String::new();
    write!(out, "{}", date.format(date_format)).map_err(|_| {
        Pdf2NoteError::InvalidConfig(format!(
            "'{date_format}' cannot be applied to a date without a time of day"
        ))
    })?;
    Ok(out)
}

/// Assemble the note skeleton around already-filtered paragraphs.
pub(crate) fn render_note(
    paragraphs: &[String],
    filename: &str,
    date: &str,
    template: &Template,
) -> String {
    let title = derive_title(filename);
    let body_len: usize = paragraphs.iter().map(|p| p.len() + 2).sum();
    let mut md = String::with_capacity(body_len + filename.len() * 3 + 256);

    md.push_str(&format!("# {title}\n\n"));
    md.push_str(&format!("> {}: {date}\n", template.created_label));
    md.push_str(&format!("> {}: {filename}\n\n", template.source_label));
    md.push_str(&format!("## {}\n\n", template.overview_heading));

    for para in paragraphs {
        md.push_str(para);
        md.push_str("\n\n");
    }

    md.push_str(&format!("## {}\n\n", template.notes_heading));
    md.push_str("- \n\n");
    md.push_str(&format!("## {}\n\n", template.links_heading));
    md.push_str("- \n\n");
    md.push_str("---\n\n");
    md.push_str(&template.attribution(filename));
    md.push('\n');

    debug!("Formatted note '{}' with {} paragraphs", title, paragraphs.len());
    md
}
