//! Progress-callback trait for per-stage conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to hear about
//! the pipeline as it runs. The CLI uses it to drive a spinner; a GUI shell
//! would use it to toggle its "loading" indicator.
//!
//! # Example
//!
//! ```rust
//! use pdf2note::{ConversionConfig, ConversionProgressCallback, Stage};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct StageCounter(AtomicUsize);
//!
//! impl ConversionProgressCallback for StageCounter {
//!     fn on_stage_complete(&self, stage: Stage, output_len: usize) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{stage} done ({output_len} bytes)");
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(StageCounter(AtomicUsize::new(0))))
//!     .build()
//!     .unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One step of the conversion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Bytes → plain text.
    Extract,
    /// Plain text → Markdown note.
    Format,
    /// Markdown → HTML preview.
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extract => "extract",
            Stage::Format => "format",
            Stage::Render => "render",
        };
        f.write_str(name)
    }
}

/// Called by the conversion pipeline as it processes a file.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Implementations must be `Send + Sync` because the
/// config holding them is shared freely.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once, after the input passed the PDF check.
    fn on_conversion_start(&self, file_name: &str, byte_len: usize) {
        let _ = (file_name, byte_len);
    }

    /// Called after each stage with the byte length of what it produced.
    fn on_stage_complete(&self, stage: Stage, output_len: usize) {
        let _ = (stage, output_len);
    }

    /// Called once, after the last stage.
    fn on_conversion_complete(&self, file_name: &str, markdown_len: usize) {
        let _ = (file_name, markdown_len);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
