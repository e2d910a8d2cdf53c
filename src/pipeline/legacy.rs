//! The first-generation preview renderer: an ordered chain of regex substitutions.
//!
//! Kept for byte-for-byte compatibility with the web page's preview. The
//! chain has known defects that are reproduced on purpose:
//!
//! - the final catch-all wraps every line in `<p>`, including headings,
//!   list items and blockquotes that were already converted
//! - only the first list gets a `<ul>`, and it stretches from the first
//!   `<li>` to the last one in the document
//! - nothing is HTML-escaped, so markup in the source is injected verbatim
//!
//! Use [`crate::pipeline::render`] with [`crate::RendererKind::Tree`] for a
//! renderer without these problems.
//!
//! ## Rule Order
//!
//! 1. `### ` → `<h3>`   2. `## ` → `<h2>`   3. `# ` → `<h1>`
//! 4. `**x**` → `<strong>`   5. `*x*` → `<em>`
//! 6. `> ` → `<blockquote>`   7. `- ` → `<li>`, first list span wrapped in `<ul>`
//! 8. blank line → `</p><p>`   9. every non-empty line → `<p>…</p>`

use once_cell::sync::Lazy;
use regex::Regex;

static RE_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static RE_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static RE_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());
static RE_STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static RE_EM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static RE_QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^> (.*)$").unwrap());
static RE_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^- (.*)$").unwrap());
static RE_LIST_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)(<li>.*</li>)").unwrap());
static RE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(.+)$").unwrap());

/// Render Markdown to HTML with the regex substitution chain.
pub fn render_legacy(markdown: &str) -> String {
    let s = RE_H3.replace_all(markdown, "<h3>${1}</h3>");
    let s = RE_H2.replace_all(&s, "<h2>${1}</h2>");
    let s = RE_H1.replace_all(&s, "<h1>${1}</h1>");
    let s = RE_STRONG.replace_all(&s, "<strong>${1}</strong>");
    let s = RE_EM.replace_all(&s, "<em>${1}</em>");
    let s = RE_QUOTE.replace_all(&s, "<blockquote>${1}</blockquote>");
    let s = RE_ITEM.replace_all(&s, "<li>${1}</li>");
    let s = RE_LIST_SPAN.replacen(&s, 1, "<ul>${1}</ul>");
    let s = s.replace("\n\n", "</p><p>");
    RE_LINE.replace_all(&s, "<p>${1}</p>").into_owned()
}
