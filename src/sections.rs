//! Split a Markdown document into one file per `##` section.
//!
//! Each section is written with its enclosing `#` chapter heading on top so
//! it stands alone in a knowledge base, and its content goes through a set
//! of cleanup rules aimed at Markdown produced by document converters
//! (leftover HTML, escaped punctuation, image links).
//!
//! ## Rule Order
//!
//! Tables must be converted before the generic tag stripper runs, and
//! unescaping happens after tag stripping so `\<` can never form a new tag.
//!
//! 1. Remove image links
//! 2. Convert HTML `<table>`s to GFM pipe tables
//! 3. Strip remaining HTML tags
//! 4. Unescape `\/ \( \) \[ \] \* \_ \# \. \:`
//! 5. Drop lines holding a lone backslash
//! 6. Collapse 3+ newlines to one blank line, trim

use crate::convert::write_atomic;
use crate::error::Pdf2NoteError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Chapter title used when a section appears before any `#` heading.
pub const NO_TITLE: &str = "no-title";

/// One `##` section and the chapter it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The enclosing `# ` heading line, if any.
    pub chapter: Option<String>,
    /// The `## ` heading line.
    pub heading: String,
    /// Lines between this heading and the next `#`/`##` heading.
    pub body: Vec<String>,
}

impl Section {
    /// `<chapter>（<section>）.md`, made safe for common file systems.
    pub fn file_name(&self) -> String {
        let chapter = self
            .chapter
            .as_deref()
            .map(heading_title)
            .unwrap_or(NO_TITLE);
        safe_file_name(&format!("{}（{}）.md", chapter, heading_title(&self.heading)))
    }

    /// Cleaned Markdown for this section, chapter heading first.
    pub fn content(&self) -> String {
        let mut lines: Vec<&str> = Vec::with_capacity(self.body.len() + 3);
        if let Some(ref chapter) = self.chapter {
            lines.push(chapter);
            lines.push("");
        }
        lines.push(&self.heading);
        lines.extend(self.body.iter().map(String::as_str));
        clean_content(&lines.join("\n"))
    }
}

/// Walk `markdown` line by line and cut it at every `#`/`##` heading.
///
/// Text before the first `##` heading belongs to no section and is dropped.
pub fn split_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut chapter: Option<String> = None;
    let mut open: Option<Section> = None;

    for line in markdown.lines() {
        if line.starts_with("# ") {
            sections.extend(open.take());
            chapter = Some(line.trim().to_string());
        } else if line.starts_with("## ") {
            sections.extend(open.take());
            open = Some(Section {
                chapter: chapter.clone(),
                heading: line.trim().to_string(),
                body: Vec::new(),
            });
        } else if let Some(ref mut section) = open {
            section.body.push(line.to_string());
        }
    }

    sections.extend(open);
    sections
}

/// Write every section into `dir`, returning the paths written.
pub async fn write_sections(
    sections: &[Section],
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, Pdf2NoteError> {
    let dir = dir.as_ref();
    let mut written = Vec::with_capacity(sections.len());
    for section in sections {
        let path = dir.join(section.file_name());
        write_atomic(&path, &section.content()).await?;
        debug!("Wrote section {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// `# 4 Checklists` → `4 Checklists`.
pub fn heading_title(heading: &str) -> &str {
    heading.trim_start_matches('#').trim()
}

/// Replace characters Windows forbids in file names with `＿`.
pub fn safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|' => '＿',
            other => other,
        })
        .collect()
}

/// Apply all cleanup rules to one section.
pub fn clean_content(input: &str) -> String {
    let s = remove_images(input);
    let s = convert_tables(&s);
    let s = strip_tags(&s);
    let s = unescape(&s);
    let s = remove_backslash_lines(&s);
    collapse_blank_lines(&s).trim().to_string()
}

// ── Rule 1: Remove image links ───────────────────────────────────────────────

static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());

fn remove_images(input: &str) -> String {
    RE_IMAGE.replace_all(input, "").into_owned()
}

// ── Rule 2: HTML tables → GFM ────────────────────────────────────────────────

static RE_TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<table\b.*?</table>").unwrap());
static RE_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").unwrap());
static RE_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<t[hd]\b[^>]*>(.*?)</t[hd]>").unwrap());

fn convert_tables(input: &str) -> String {
    RE_TABLE
        .replace_all(input, |caps: &Captures<'_>| {
            format!("\n{}\n", html_table_to_gfm(&caps[0]))
        })
        .into_owned()
}

/// Convert one `<table>` element. The first row becomes the header. Returns
/// an empty string when the table has no cells.
pub fn html_table_to_gfm(html: &str) -> String {
    let rows: Vec<Vec<String>> = RE_ROW
        .captures_iter(html)
        .map(|row| {
            RE_CELL
                .captures_iter(&row[1])
                .map(|cell| strip_tags(&cell[1]).trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();

    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!("| {} |", header.join(" | ")));
    lines.push(format!("| {} |", vec!["---"; header.len()].join(" | ")));
    for row in body {
        lines.push(format!("| {} |", row.join(" | ")));
    }
    lines.join("\n")
}

// ── Rule 3: Strip tags ───────────────────────────────────────────────────────

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]+>").unwrap());

fn strip_tags(input: &str) -> String {
    RE_TAG.replace_all(input, "").into_owned()
}

// ── Rule 4: Unescape punctuation ─────────────────────────────────────────────

const ESCAPES: [(&str, &str); 10] = [
    (r"\/", "/"),
    (r"\(", "("),
    (r"\)", ")"),
    (r"\[", "["),
    (r"\]", "]"),
    (r"\*", "*"),
    (r"\_", "_"),
    (r"\#", "#"),
    (r"\.", "."),
    (r"\:", ":"),
];

fn unescape(input: &str) -> String {
    ESCAPES
        .iter()
        .fold(input.to_string(), |s, (esc, real)| s.replace(esc, real))
}

// ── Rule 5: Lone backslash lines ─────────────────────────────────────────────

static RE_LONE_BACKSLASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\\[ \t]*$").unwrap());

fn remove_backslash_lines(input: &str) -> String {
    RE_LONE_BACKSLASH.replace_all(input, "").into_owned()
}

// ── Rule 6: Collapse blank lines ─────────────────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").into_owned()
}
