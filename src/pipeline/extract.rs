//! Byte extraction: raw file bytes → best-effort plain text.
//!
//! This is a heuristic, not a PDF parser. Uncompressed content streams show
//! text with literal strings such as `(Hello) Tj`, so every parenthesised run
//! is taken as a piece of text and everything else is discarded. Compressed
//! streams, encrypted documents, hex strings and image-only scans contain no
//! such runs, and the result is then empty or garbage. That is accepted.
//!
//! ## Rule Order
//!
//! 1. Decode as UTF-8, lossy (never fails)
//! 2. Keep only the inner text of `( … )` runs, joined by spaces, if any exist
//! 3. Turn the escape `\n` into a line break
//! 4. Drop every other backslash
//! 5. Collapse whitespace runs to one space and trim

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Result of running the extractor over one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Whitespace-normalized text.
    pub text: String,
    /// Number of `( … )` literal runs matched. Zero means the decoded text
    /// was kept as is.
    pub literal_runs: usize,
}

static RE_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Extract plain text from raw bytes. Never fails.
pub fn extract_text(bytes: &[u8]) -> String {
    extract(bytes).text
}

/// Extract plain text from raw bytes, also reporting how many literal runs
/// were found.
pub fn extract(bytes: &[u8]) -> Extraction {
    let decoded = decode_utf8(bytes);

    let literals: Vec<&str> = RE_LITERAL
        .captures_iter(&decoded)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    let literal_runs = literals.len();

    let scraped = if literal_runs > 0 {
        literals.join(" ")
    } else {
        decoded
    };

    let text = normalise(&scraped);
    debug!(
        "Extracted {} chars from {} bytes ({} literal runs)",
        text.len(),
        bytes.len(),
        literal_runs
    );
    if text.is_empty() && !bytes.is_empty() {
        warn!("No text recovered; the PDF is likely compressed, encrypted or image-only");
    }

    Extraction { text, literal_runs }
}

/// Lossy UTF-8 decode that also drops a leading byte-order mark.
fn decode_utf8(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

fn normalise(input: &str) -> String {
    let s = input.replace("\\n", "\n").replace('\\', "");
    RE_WHITESPACE.replace_all(&s, " ").trim().to_string()
}
