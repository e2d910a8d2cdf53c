//! Pipeline stages for PDF-to-note conversion.
//!
//! Each submodule implements exactly one transformation step, as a pure
//! function over in-memory data. Only [`input::read_source`] touches the
//! file system.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ format ──▶ render
//! (bytes)   (text)      (Markdown) (HTML)
//! ```
//!
//! 1. [`input`]: read the selected file and gate on `application/pdf`
//! 2. [`extract`]: lossy UTF-8 decode and scrape `( … )` literal runs
//! 3. [`format`]: wrap the text in the fixed note template
//! 4. [`render`]: Markdown → HTML preview; [`legacy`] keeps the older
//!    regex chain

pub mod extract;
pub mod format;
pub mod input;
pub mod legacy;
pub mod render;
