//! # pdf2note
//!
//! Turn a PDF into a Markdown knowledge-base note, with an HTML preview.
//!
//! ## What this crate is (and is not)
//!
//! The text extraction is a heuristic: the file is decoded as UTF-8 and every
//! parenthesised literal, the way uncompressed PDF content streams spell out
//! text, is kept. There is no object model, no xref table, no stream
//! decompression, no font encoding. Simple generated PDFs come out fine; most
//! real-world PDFs come out empty or garbled. That limitation is deliberate.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Input    media-type gate (application/pdf only)
//!  ├─ 2. Extract  lossy UTF-8 decode, scrape ( … ) literals, normalise spaces
//!  ├─ 3. Format   fixed note template: title, date, overview, notes, links
//!  └─ 4. Render   Markdown → HTML preview (tree renderer or legacy regex chain)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2note::{convert_file, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let output = convert_file("document.pdf", None, &config).await?;
//!     println!("{}", output.markdown);
//!     eprintln!("{} paragraphs kept", output.stats.paragraphs_kept);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2note` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod sections;
pub mod session;
pub mod template;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, RendererKind};
pub use convert::{convert, convert_dated, convert_file, convert_sync, convert_to_file, inspect};
pub use error::Pdf2NoteError;
pub use output::{ConversionOutput, ConversionStats};
pub use pipeline::extract::{extract, extract_text, Extraction};
pub use pipeline::format::{format_markdown, format_markdown_today};
pub use pipeline::input::SourceFile;
pub use pipeline::render::render_html;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback, Stage};
pub use sections::{split_sections, write_sections, Section};
pub use session::{user_message, Session, Ticket, ViewState};
pub use template::{Language, Template};
