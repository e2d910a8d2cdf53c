//! Conversion entry points.
//!
//! [`convert`] is the single conversion function: it takes a [`SourceFile`]
//! already in memory and returns an immutable [`ConversionOutput`] or a
//! [`Pdf2NoteError`]. It never suspends. The async wrappers add the one step
//! that does, reading the file, and the download artefact write.

use crate::config::{validate_date_format, ConversionConfig};
use crate::error::Pdf2NoteError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::extract::{self, Extraction};
use crate::pipeline::input::{self, SourceFile};
use crate::pipeline::{format, render};
use crate::progress::Stage;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Convert an in-memory file to a note, dated today.
///
/// # Errors
/// - [`Pdf2NoteError::NotAPdf`] when the media type is not
///   `application/pdf`; extraction is not attempted.
/// - [`Pdf2NoteError::InvalidConfig`] when `config.date_format` is unusable.
pub fn convert(
    source: &SourceFile,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2NoteError> {
    convert_dated(source, format::today(), config)
}

/// [`convert`] with an explicit creation date.
pub fn convert_dated(
    source: &SourceFile,
    date: NaiveDate,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2NoteError> {
    let start = Instant::now();

    // ── Step 1: Gate on media type ───────────────────────────────────────
    source.ensure_pdf()?;
    validate_date_format(&config.date_format)?;
    info!(
        "Starting conversion: {} ({} bytes)",
        source.name,
        source.bytes.len()
    );
    let cb = config.progress_callback.as_ref();
    if let Some(cb) = cb {
        cb.on_conversion_start(&source.name, source.bytes.len());
    }

    // ── Step 2: Extract ──────────────────────────────────────────────────
    let extraction = extract::extract(&source.bytes);
    if let Some(cb) = cb {
        cb.on_stage_complete(Stage::Extract, extraction.text.len());
    }

    // ── Step 3: Format ───────────────────────────────────────────────────
    let template = config.language.template();
    let paragraphs = format::split_paragraphs(&extraction.text, config.min_paragraph_chars);
    let date = format::format_date(date, &config.date_format)?;
    let markdown = format::render_note(&paragraphs.kept, &source.name, &date, template);
    if let Some(cb) = cb {
        cb.on_stage_complete(Stage::Format, markdown.len());
    }

    // ── Step 4: Render preview ───────────────────────────────────────────
    let html = if config.render_html {
        let html = render::render_html(&markdown, config.renderer);
        if let Some(cb) = cb {
            cb.on_stage_complete(Stage::Render, html.len());
        }
        Some(html)
    } else {
        None
    };

    let stats = ConversionStats {
        source_bytes: source.bytes.len(),
        literal_runs: extraction.literal_runs,
        extracted_chars: extraction.text.chars().count(),
        paragraphs_kept: paragraphs.kept.len(),
        paragraphs_dropped: paragraphs.dropped,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} paragraphs kept, {} dropped, {}ms",
        stats.paragraphs_kept, stats.paragraphs_dropped, stats.duration_ms
    );
    if let Some(cb) = cb {
        cb.on_conversion_complete(&source.name, markdown.len());
    }

    Ok(ConversionOutput {
        title: format::derive_title(&source.name).to_string(),
        source_name: source.name.clone(),
        download_name: format::download_name(&source.name),
        markdown,
        html,
        stats,
    })
}

/// Read a file and convert it.
///
/// `media_type` overrides the extension/magic-byte detection.
pub async fn convert_file(
    path: impl AsRef<Path>,
    media_type: Option<&str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2NoteError> {
    let source = input::read_source(path, media_type).await?;
    convert(&source, config)
}

/// Convert a file and write the Markdown to `output_path`.
///
/// When `output_path` is a directory the file is named after
/// [`ConversionOutput::download_name`]. Uses atomic write (temp file + rename)
/// so a failed run never leaves a partial note behind. Returns the output
/// together with the path actually written.
pub async fn convert_to_file(
    path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    media_type: Option<&str>,
    config: &ConversionConfig,
) -> Result<(ConversionOutput, PathBuf), Pdf2NoteError> {
    let output = convert_file(path, media_type, config).await?;

    let requested = output_path.as_ref();
    let target = if tokio::fs::metadata(requested)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        requested.join(&output.download_name)
    } else {
        requested.to_path_buf()
    };

    write_atomic(&target, &output.markdown).await?;
    Ok((output, target))
}

/// Synchronous wrapper around [`convert_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2NoteError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2NoteError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert_file(path, None, config))
}

/// Run only the extractor on a file. No template, no date, no preview.
pub async fn inspect(
    path: impl AsRef<Path>,
    media_type: Option<&str>,
) -> Result<Extraction, Pdf2NoteError> {
    let source = input::read_source(path, media_type).await?;
    source.ensure_pdf()?;
    Ok(extract::extract(&source.bytes))
}

/// Write `contents` to `path` via a sibling temp file and a rename.
pub async fn write_atomic(path: &Path, contents: &str) -> Result<(), Pdf2NoteError> {
    let write_err = |e: std::io::Error| Pdf2NoteError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(write_err)?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        tokio::fs::remove_file(&tmp_path).await.ok();
        return Err(write_err(e));
    }

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
