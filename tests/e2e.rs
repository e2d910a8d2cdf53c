//! End-to-end integration tests for pdf2note.
//!
//! Every test writes its own small input into a temp directory and drives the
//! public API the way the CLI does, so nothing here needs fixtures on disk.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use pdf2note::{
    convert, convert_dated, convert_file, convert_sync, convert_to_file, inspect, render_html,
    split_sections, write_sections, ConversionConfig, ConversionProgressCallback, Language,
    Pdf2NoteError, RendererKind, Session, SourceFile, Stage,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// ── Test helpers ─────────────────────────────────────────────────────────────

const LONG: &str = "This is a much longer paragraph of sample text exceeding twenty chars";

/// A tiny uncompressed "PDF" whose content stream shows two text literals.
fn sample_pdf() -> Vec<u8> {
    format!(
        "%PDF-1.4\n1 0 obj << /Length 90 >> stream\nBT /F1 12 Tf (Section One) Tj ({LONG}) Tj ET\nendstream endobj\n%%EOF\n"
    )
    .into_bytes()
}

fn write_input(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Send library logs to the test harness; set `RUST_LOG=pdf2note=debug` to see them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn date() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// Records every callback so tests can check the order of stages.
#[derive(Default)]
struct RecordingCallback {
    events: Mutex<Vec<String>>,
}

impl ConversionProgressCallback for RecordingCallback {
    fn on_conversion_start(&self, file_name: &str, _byte_len: usize) {
        self.events.lock().unwrap().push(format!("start:{file_name}"));
    }

    fn on_stage_complete(&self, stage: Stage, _output_len: usize) {
        self.events.lock().unwrap().push(stage.to_string());
    }

    fn on_conversion_complete(&self, file_name: &str, _markdown_len: usize) {
        self.events.lock().unwrap().push(format!("done:{file_name}"));
    }
}

// ── Conversion ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_convert_file_end_to_end() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(dir.path(), "report.pdf", &sample_pdf());

    let output = convert_file(&path, None, &ConversionConfig::default())
        .await
        .unwrap();

    let md = &output.markdown;
    assert!(md.starts_with("# report\n\n> Created: "), "{md}");
    assert!(md.contains("> Source: report.pdf\n"));
    assert!(md.contains("## Overview\n"));
    assert!(md.contains("## Notes\n"));
    assert!(md.contains("## Reference Links\n"));
    assert!(md.contains("\n---\n"));
    assert!(md.ends_with("*This document was auto-generated from report.pdf*\n"));

    // Literals are joined by spaces and whitespace is collapsed, so the short
    // heading text rides along with the long paragraph.
    assert!(md.contains(&format!("\nSection One {LONG}\n")));
    assert_eq!(output.stats.paragraphs_kept, 1);
    assert_eq!(output.stats.literal_runs, 2);

    let html = output.html.as_deref().unwrap();
    assert!(html.contains("<h1>report</h1>"));
    assert!(html.contains("<h2>Overview</h2>"));
    assert!(html.contains("<hr>"));
}

#[tokio::test]
async fn test_non_pdf_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(dir.path(), "notes.txt", b"(Hello) (World)");

    let err = convert_file(&path, None, &ConversionConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Pdf2NoteError::NotAPdf { .. }), "{err:?}");
    assert!(err.is_rejection());

    // An explicit media type wins over detection in both directions.
    let forced = convert_file(&path, Some("application/pdf"), &ConversionConfig::default())
        .await
        .unwrap();
    assert_eq!(forced.title, "notes.txt");

    let pdf = write_input(dir.path(), "real.pdf", &sample_pdf());
    let err = convert_file(&pdf, Some("image/png"), &ConversionConfig::default())
        .await
        .unwrap_err();
    assert!(err.is_rejection());
}

#[tokio::test]
async fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_file(dir.path().join("nope.pdf"), None, &ConversionConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Pdf2NoteError::FileNotFound { .. }));
    assert!(!err.is_rejection());
}

#[test]
fn test_no_literals_keeps_raw_text() {
    let src = SourceFile::new("raw.pdf", "application/pdf", b"just   some\n\nwords that are long enough".to_vec());
    let out = convert_dated(&src, date(), &ConversionConfig::default()).unwrap();
    assert_eq!(out.stats.literal_runs, 0);
    assert!(out.markdown.contains("\njust some words that are long enough\n"));
}

#[test]
fn test_short_text_leaves_overview_empty() {
    let src = SourceFile::new("short.pdf", "application/pdf", b"(Hello) (World)".to_vec());
    let out = convert_dated(&src, date(), &ConversionConfig::default()).unwrap();
    assert!(out.markdown.contains("## Overview\n\n## Notes\n"));
    assert_eq!(out.stats.paragraphs_kept, 0);
    assert_eq!(out.stats.paragraphs_dropped, 1);
}

#[test]
fn test_min_paragraph_chars_is_configurable() {
    let config = ConversionConfig::builder()
        .min_paragraph_chars(5)
        .build()
        .unwrap();
    let src = SourceFile::new("short.pdf", "application/pdf", b"(Hello) (World)".to_vec());
    let out = convert_dated(&src, date(), &config).unwrap();
    assert!(out.markdown.contains("## Overview\n\nHello World\n\n## Notes\n"));
}

#[test]
fn test_progress_callback_order() {
    let cb = Arc::new(RecordingCallback::default());
    let config = ConversionConfig::builder()
        .progress_callback(cb.clone())
        .build()
        .unwrap();
    let src = SourceFile::new("p.pdf", "application/pdf", sample_pdf());
    convert(&src, &config).unwrap();

    let events = cb.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec!["start:p.pdf", "extract", "format", "render", "done:p.pdf"]
    );
}

#[test]
fn test_rejection_fires_no_callbacks() {
    let cb = Arc::new(RecordingCallback::default());
    let config = ConversionConfig::builder()
        .progress_callback(cb.clone())
        .build()
        .unwrap();
    let src = SourceFile::new("p.png", "image/png", vec![0x89, b'P', b'N', b'G']);
    assert!(convert(&src, &config).is_err());
    assert!(cb.events.lock().unwrap().is_empty());
}

#[test]
fn test_convert_sync() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(dir.path(), "sync.pdf", &sample_pdf());
    let out = convert_sync(&path, &ConversionConfig::default()).unwrap();
    assert_eq!(out.download_name, "sync.md");
}

#[test]
fn test_convert_json_serialisable() {
    init_tracing();
    let src = SourceFile::new("data.pdf", "application/pdf", sample_pdf());
    let out = convert_dated(&src, date(), &ConversionConfig::default()).unwrap();

    let json = serde_json::to_string(&out).unwrap();
    assert!(json.contains("\"download_name\":\"data.md\""), "{json}");
    let back: pdf2note::ConversionOutput = serde_json::from_str(&json).unwrap();
    assert_eq!(back, out);
}

#[test]
fn test_time_of_day_date_format_is_caught() {
    assert!(ConversionConfig::builder().date_format("%H:%M").build().is_err());

    let mut config = ConversionConfig::default();
    config.date_format = "%H:%M".into();
    let src = SourceFile::new("a.pdf", "application/pdf", b"(hello)".to_vec());
    let err = convert(&src, &config).unwrap_err();
    assert!(matches!(err, Pdf2NoteError::InvalidConfig(_)));
}

// ── Output artefacts ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_convert_to_directory_uses_download_name() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "paper.pdf", &sample_pdf());
    let out_dir = dir.path().join("notes");
    std::fs::create_dir(&out_dir).unwrap();

    let (output, written) = convert_to_file(&input, &out_dir, None, &ConversionConfig::default())
        .await
        .unwrap();

    assert_eq!(written, out_dir.join("paper.md"));
    assert_eq!(std::fs::read_to_string(&written).unwrap(), output.markdown);
    assert!(!out_dir.join("paper.md.tmp").exists());
}

#[tokio::test]
async fn test_convert_to_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "paper.pdf", &sample_pdf());
    let target = dir.path().join("out/custom.md");

    let (_, written) = convert_to_file(&input, &target, None, &ConversionConfig::default())
        .await
        .unwrap();
    assert_eq!(written, target);
    assert!(target.exists());
}

#[tokio::test]
async fn test_failed_conversion_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "image.png", b"\x89PNG");
    let target = dir.path().join("image.md");

    let result = convert_to_file(&input, &target, None, &ConversionConfig::default()).await;
    assert!(result.is_err());
    assert!(!target.exists());
}

#[tokio::test]
async fn test_inspect() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(dir.path(), "x.pdf", b"(Hello) (World)");
    let extraction = inspect(&path, None).await.unwrap();
    assert_eq!(extraction.text, "Hello World");
    assert_eq!(extraction.literal_runs, 2);
}

#[tokio::test]
async fn test_split_note_into_sections() {
    let dir = tempfile::tempdir().unwrap();
    let src = SourceFile::new("guide.pdf", "application/pdf", sample_pdf());
    let out = convert_dated(&src, date(), &ConversionConfig::default()).unwrap();

    let sections = split_sections(&out.markdown);
    let names: Vec<String> = sections.iter().map(|s| s.file_name()).collect();
    assert_eq!(
        names,
        vec![
            "guide（Overview）.md",
            "guide（Notes）.md",
            "guide（Reference Links）.md"
        ]
    );

    let written = write_sections(&sections, dir.path().join("split"))
        .await
        .unwrap();
    assert_eq!(written.len(), 3);
    let overview = std::fs::read_to_string(&written[0]).unwrap();
    assert!(overview.starts_with("# guide\n\n## Overview\n"));
    assert!(overview.contains(LONG));
}

// ── Rendering ────────────────────────────────────────────────────────────────

#[test]
fn test_renderers_agree_on_basic_styles() {
    for kind in [RendererKind::Tree, RendererKind::Legacy] {
        let html = render_html("# T\n\n**b** *i*", kind);
        assert!(html.contains("<h1>T</h1>"), "{kind:?}: {html}");
        assert!(html.contains("<strong>b</strong>"), "{kind:?}: {html}");
        assert!(html.contains("<em>i</em>"), "{kind:?}: {html}");
    }
}

#[test]
fn test_tree_renderer_escapes_document_text() {
    let src = SourceFile::new(
        "x.pdf",
        "application/pdf",
        b"(<img src=x onerror=alert> is plain document text)".to_vec(),
    );
    let out = convert_dated(&src, date(), &ConversionConfig::default()).unwrap();
    let html = out.html.unwrap();
    assert!(!html.contains("<img"), "{html}");
    assert!(html.contains("&lt;img"));
}

// ── Session ──────────────────────────────────────────────────────────────────

#[test]
fn test_session_flow() {
    let mut session = Session::new(Language::Japanese);
    let config = ConversionConfig::builder()
        .language(Language::Japanese)
        .build()
        .unwrap();

    let pdf = SourceFile::new("資料.pdf", "application/pdf", sample_pdf());
    let state = session.run(&pdf, &config);
    assert!(state.error.is_none());
    assert!(!state.loading);

    let (name, md) = session.download().unwrap();
    assert_eq!(name, "資料.md");
    assert!(md.contains("## 概要\n"));

    let txt = SourceFile::new("memo.txt", "text/plain", b"hi".to_vec());
    let state = session.run(&txt, &config);
    assert_eq!(state.error.as_deref(), Some("PDFファイルを選択してください"));
    assert!(session.markdown().is_some());
}
