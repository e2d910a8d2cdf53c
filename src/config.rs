//! Configuration types for PDF-to-note conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce the web front
//! end (20-character paragraph filter, unpadded `YYYY/M/D` dates); the
//! one deliberate departure is the tree renderer. Callers set only what they need.

use crate::error::Pdf2NoteError;
use crate::pipeline::format::format_date;
use crate::progress::ProgressCallback;
use crate::template::Language;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default `strftime` pattern for the "created" line (ja-JP short date, no zero padding).
pub const DEFAULT_DATE_FORMAT: &str = "%Y/%-m/%-d";

/// Paragraphs whose trimmed length is at or below this are dropped.
pub const DEFAULT_MIN_PARAGRAPH_CHARS: usize = 20;

/// Configuration for a PDF-to-note conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2note::{ConversionConfig, Language, RendererKind};
///
/// let config = ConversionConfig::builder()
///     .language(Language::Japanese)
///     .renderer(RendererKind::Legacy)
///     .date_format("%Y-%m-%d")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Paragraphs whose trimmed length (in characters) is at or below this
    /// value are treated as extraction noise and left out. Default: 20.
    pub min_paragraph_chars: usize,

    /// `strftime` pattern for the creation date. Default: `%Y/%-m/%-d`.
    pub date_format: String,

    /// Language of the note labels and user-facing messages. Default: English.
    pub language: Language,

    /// Markdown → HTML renderer used for the preview. Default: [`RendererKind::Tree`].
    pub renderer: RendererKind,

    /// Produce the HTML preview as part of the conversion output. Default: true.
    pub render_html: bool,

    /// Optional observer notified as each stage completes.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            language: Language::default(),
            renderer: RendererKind::default(),
            render_html: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("min_paragraph_chars", &self.min_paragraph_chars)
            .field("date_format", &self.date_format)
            .field("language", &self.language)
            .field("renderer", &self.renderer)
            .field("render_html", &self.render_html)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn min_paragraph_chars(mut self, n: usize) -> Self {
        self.config.min_paragraph_chars = n;
        self
    }

    pub fn date_format(mut self, fmt: impl Into<String>) -> Self {
        self.config.date_format = fmt.into();
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.config.language = language;
        self
    }

    pub fn renderer(mut self, renderer: RendererKind) -> Self {
        self.config.renderer = renderer;
        self
    }

    pub fn render_html(mut self, v: bool) -> Self {
        self.config.render_html = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2NoteError> {
        validate_date_format(&self.config.date_format)?;
        Ok(self.config)
    }
}

/// Reject empty patterns, patterns chrono cannot parse, and patterns that
/// need a time of day, so a bad `--date-format` fails up front.
pub(crate) fn validate_date_format(fmt: &str) -> Result<(), Pdf2NoteError> {
    if fmt.trim().is_empty() {
        return Err(Pdf2NoteError::InvalidConfig(
            "date format must not be empty".into(),
        ));
    }
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(Pdf2NoteError::InvalidConfig(format!(
            "'{fmt}' is not a valid strftime date format"
        )));
    }
    format_date(NaiveDate::MIN, fmt).map(|_| ())
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Which Markdown → HTML renderer produces the preview.
///
/// | Renderer | Behaviour |
/// |----------|-----------|
/// | `Tree`   | Tokenizes into typed blocks, escapes HTML, no double wrapping (default) |
/// | `Legacy` | The older ordered regex chain, quirks and all |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RendererKind {
    #[default]
    Tree,
    Legacy,
}
