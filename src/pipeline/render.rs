//! Preview rendering: Markdown → HTML.
//!
//! The default renderer tokenizes the note into a small typed tree first
//! ([`Block`] / [`Inline`]) and only then emits HTML. Working on a tree
//! instead of on text means no rule can re-match the output of an earlier
//! rule, so headings, quotes and list items are never wrapped in `<p>`, and
//! every piece of document text goes through [`escape_html`] exactly once.
//!
//! The supported subset is the one the note template uses: `#`–`###`
//! headings, `> ` quotes, `- ` lists, `---` rules, paragraphs, and
//! single-level `**strong**` / `*emphasis*`. Anything else is plain text.

use crate::config::RendererKind;
use crate::pipeline::legacy::render_legacy;

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`, `##` or `###` heading.
    Heading { level: u8, content: Vec<Inline> },
    /// Consecutive plain lines.
    Paragraph(Vec<Vec<Inline>>),
    /// Consecutive `> ` lines.
    Blockquote(Vec<Vec<Inline>>),
    /// Consecutive `- ` items.
    List(Vec<Vec<Inline>>),
    /// `---` (three or more dashes).
    Rule,
}

/// An inline node. Styles do not nest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Emphasis(String),
}

/// Render Markdown to HTML with the chosen renderer.
pub fn render_html(markdown: &str, kind: RendererKind) -> String {
    match kind {
        RendererKind::Tree => to_html(&parse_blocks(markdown)),
        RendererKind::Legacy => render_legacy(markdown),
    }
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Open block being accumulated while scanning lines.
enum Open {
    None,
    Paragraph(Vec<Vec<Inline>>),
    Quote(Vec<Vec<Inline>>),
    List(Vec<Vec<Inline>>),
}

impl Open {
    fn close(self, blocks: &mut Vec<Block>) {
        match self {
            Open::None => {}
            Open::Paragraph(lines) => blocks.push(Block::Paragraph(lines)),
            Open::Quote(lines) => blocks.push(Block::Blockquote(lines)),
            Open::List(items) => blocks.push(Block::List(items)),
        }
    }
}

/// Split Markdown into blocks.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open = Open::None;

    for raw in markdown.lines() {
        let line = raw.trim_end();

        if line.trim().is_empty() {
            std::mem::replace(&mut open, Open::None).close(&mut blocks);
            continue;
        }

        if let Some((level, text)) = heading(line) {
            std::mem::replace(&mut open, Open::None).close(&mut blocks);
            blocks.push(Block::Heading {
                level,
                content: parse_inlines(text),
            });
            continue;
        }

        if is_rule(line) {
            std::mem::replace(&mut open, Open::None).close(&mut blocks);
            blocks.push(Block::Rule);
            continue;
        }

        if let Some(text) = list_item(line) {
            open = match open {
                Open::List(mut items) => {
                    items.push(parse_inlines(text));
                    Open::List(items)
                }
                other => {
                    other.close(&mut blocks);
                    Open::List(vec![parse_inlines(text)])
                }
            };
            continue;
        }

        if let Some(text) = line.strip_prefix("> ") {
            open = match open {
                Open::Quote(mut lines) => {
                    lines.push(parse_inlines(text));
                    Open::Quote(lines)
                }
                other => {
                    other.close(&mut blocks);
                    Open::Quote(vec![parse_inlines(text)])
                }
            };
            continue;
        }

        open = match open {
            Open::Paragraph(mut lines) => {
                lines.push(parse_inlines(line.trim_start()));
                Open::Paragraph(lines)
            }
            other => {
                other.close(&mut blocks);
                Open::Paragraph(vec![parse_inlines(line.trim_start())])
            }
        };
    }

    open.close(&mut blocks);
    blocks
}

fn heading(line: &str) -> Option<(u8, &str)> {
    if let Some(t) = line.strip_prefix("### ") {
        Some((3, t))
    } else if let Some(t) = line.strip_prefix("## ") {
        Some((2, t))
    } else {
        line.strip_prefix("# ").map(|t| (1, t))
    }
}

fn is_rule(line: &str) -> bool {
    let t = line.trim();
    t.len() >= 3 && t.chars().all(|c| c == '-')
}

fn list_item(line: &str) -> Option<&str> {
    // The template's empty bullet is "- " which trim_end has reduced to "-".
    if line == "-" {
        Some("")
    } else {
        line.strip_prefix("- ")
    }
}

/// Split one line of text into inline nodes.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**") {
            if let Some(end) = after.find("**").filter(|&e| e > 0) {
                flush_text(&mut plain, &mut out);
                out.push(Inline::Strong(after[..end].to_string()));
                rest = &after[end + 2..];
                continue;
            }
        } else if let Some(after) = rest.strip_prefix('*') {
            if let Some(end) = after.find('*').filter(|&e| e > 0) {
                flush_text(&mut plain, &mut out);
                out.push(Inline::Emphasis(after[..end].to_string()));
                rest = &after[end + 1..];
                continue;
            }
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            plain.push(ch);
        }
        rest = chars.as_str();
    }

    flush_text(&mut plain, &mut out);
    out
}

fn flush_text(plain: &mut String, out: &mut Vec<Inline>) {
    if !plain.is_empty() {
        out.push(Inline::Text(std::mem::take(plain)));
    }
}

// ── Emission ─────────────────────────────────────────────────────────────────

/// Emit HTML for a block tree, one block per line.
pub fn to_html(blocks: &[Block]) -> String {
    let mut html = String::new();
    for block in blocks {
        match block {
            Block::Heading { level, content } => {
                html.push_str(&format!("<h{level}>"));
                push_inlines(&mut html, content);
                html.push_str(&format!("</h{level}>\n"));
            }
            Block::Paragraph(lines) => {
                html.push_str("<p>");
                push_lines(&mut html, lines, "\n");
                html.push_str("</p>\n");
            }
            Block::Blockquote(lines) => {
                html.push_str("<blockquote>");
                push_lines(&mut html, lines, "<br>\n");
                html.push_str("</blockquote>\n");
            }
            Block::List(items) => {
                html.push_str("<ul>\n");
                for item in items {
                    html.push_str("<li>");
                    push_inlines(&mut html, item);
                    html.push_str("</li>\n");
                }
                html.push_str("</ul>\n");
            }
            Block::Rule => html.push_str("<hr>\n"),
        }
    }
    html
}

fn push_lines(html: &mut String, lines: &[Vec<Inline>], sep: &str) {
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            html.push_str(sep);
        }
        push_inlines(html, line);
    }
}

fn push_inlines(html: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(t) => html.push_str(&escape_html(t)),
            Inline::Strong(t) => {
                html.push_str("<strong>");
                html.push_str(&escape_html(t));
                html.push_str("</strong>");
            }
            Inline::Emphasis(t) => {
                html.push_str("<em>");
                html.push_str(&escape_html(t));
                html.push_str("</em>");
            }
        }
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_and_inline_styles() {
        let html = render_html("# Title\n\n**bold** and *italic*", RendererKind::Tree);
        assert_eq!(
            html,
            "<h1>Title</h1>\n<p><strong>bold</strong> and <em>italic</em></p>\n"
        );
    }

    #[test]
    fn both_renderers_cover_basic_styles() {
        for kind in [RendererKind::Tree, RendererKind::Legacy] {
            let html = render_html("# Title\n\n**bold** and *italic*", kind);
            assert!(html.contains("<h1>Title</h1>"), "{kind:?}: {html}");
            assert!(html.contains("<strong>bold</strong>"), "{kind:?}: {html}");
            assert!(html.contains("<em>italic</em>"), "{kind:?}: {html}");
        }
    }

    #[test]
    fn contiguous_items_form_one_list() {
        let blocks = parse_blocks("- a\n- b\n\n- c");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::List(items) if items.len() == 2));
        assert!(matches!(&blocks[1], Block::List(items) if items.len() == 1));
    }

    #[test]
    fn blocks_are_not_wrapped_in_paragraphs() {
        let html = render_html("> quoted\n\n- item\n\n---", RendererKind::Tree);
        assert_eq!(
            html,
            "<blockquote>quoted</blockquote>\n<ul>\n<li>item</li>\n</ul>\n<hr>\n"
        );
    }

    #[test]
    fn quote_lines_are_merged() {
        let html = render_html("> Created: 2026/10/19\n> Source: a.pdf", RendererKind::Tree);
        assert_eq!(
            html,
            "<blockquote>Created: 2026/10/19<br>\nSource: a.pdf</blockquote>\n"
        );
    }

    #[test]
    fn empty_bullet_renders_empty_item() {
        let html = render_html("## Notes\n\n- \n", RendererKind::Tree);
        assert!(html.contains("<h2>Notes</h2>"));
        assert!(html.contains("<li></li>"));
    }

    #[test]
    fn document_text_is_escaped() {
        let html = render_html("<script>alert('x')</script> & **<b>**", RendererKind::Tree);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; "));
        assert!(html.contains("<strong>&lt;b&gt;</strong>"));
    }

    #[test]
    fn unmatched_stars_stay_literal() {
        assert_eq!(
            parse_inlines("2 * 3 = 6"),
            vec![Inline::Text("2 * 3 = 6".into())]
        );
        assert_eq!(parse_inlines("****"), vec![Inline::Text("****".into())]);
    }

    #[test]
    fn deeper_headings_are_text() {
        let blocks = parse_blocks("#### four");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![vec![Inline::Text("#### four".into())]])]
        );
    }

    #[test]
    fn paragraph_lines_join() {
        let html = render_html("one\ntwo", RendererKind::Tree);
        assert_eq!(html, "<p>one\ntwo</p>\n");
    }
}
