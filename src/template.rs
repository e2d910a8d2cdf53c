//! Fixed wording for the generated note and for user-facing messages.
//!
//! Every label that ends up in a document or in front of a user lives here,
//! once per [`Language`]. The formatter and the session pick a [`Template`]
//! and never hard-code text of their own.

use serde::{Deserialize, Serialize};

/// Language of the note template and of user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    /// English labels (default).
    #[default]
    English,
    /// Japanese labels, as used by the web front end.
    Japanese,
}

impl Language {
    /// The template for this language.
    pub fn template(self) -> &'static Template {
        match self {
            Language::English => &ENGLISH,
            Language::Japanese => &JAPANESE,
        }
    }
}

/// Labels and messages for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Prefix of the creation-date blockquote line.
    pub created_label: &'static str,
    /// Prefix of the source-filename blockquote line.
    pub source_label: &'static str,
    pub overview_heading: &'static str,
    pub notes_heading: &'static str,
    pub links_heading: &'static str,
    /// Text placed before the filename in the attribution line.
    pub attribution_prefix: &'static str,
    /// Text placed after the filename in the attribution line.
    pub attribution_suffix: &'static str,
    /// Shown when the selected file is not a PDF.
    pub rejection: &'static str,
    /// Prefix of the message shown when a conversion fails.
    pub failure_prefix: &'static str,
    /// Status shown while a conversion is in flight.
    pub converting: &'static str,
}

pub const ENGLISH: Template = Template {
    created_label: "Created",
    source_label: "Source",
    overview_heading: "Overview",
    notes_heading: "Notes",
    links_heading: "Reference Links",
    attribution_prefix: "This document was auto-generated from ",
    attribution_suffix: "",
    rejection: "Please select a PDF file",
    failure_prefix: "An error occurred while converting the PDF: ",
    converting: "Converting…",
};

pub const JAPANESE: Template = Template {
    created_label: "作成日",
    source_label: "ソース",
    overview_heading: "概要",
    notes_heading: "メモ",
    links_heading: "参考リンク",
    attribution_prefix: "このドキュメントは",
    attribution_suffix: "から自動生成されました",
    rejection: "PDFファイルを選択してください",
    failure_prefix: "PDFの変換中にエラーが発生しました: ",
    converting: "変換中...",
};

impl Template {
    /// The italic attribution line naming the source file, without the
    /// trailing newline.
    pub fn attribution(&self, filename: &str) -> String {
        format!(
            "*{}{}{}*",
            self.attribution_prefix, filename, self.attribution_suffix
        )
    }

    /// Fixed message for a non-PDF selection.
    pub fn rejection_message(&self) -> String {
        self.rejection.to_string()
    }

    /// Message for a failed conversion, including the underlying error text.
    pub fn failure_message(&self, detail: &str) -> String {
        format!("{}{}", self.failure_prefix, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_is_default() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Language::default().template().overview_heading, "Overview");
    }

    #[test]
    fn attribution_places_filename() {
        assert_eq!(
            ENGLISH.attribution("report.pdf"),
            "*This document was auto-generated from report.pdf*"
        );
        assert_eq!(
            JAPANESE.attribution("report.pdf"),
            "*このドキュメントはreport.pdfから自動生成されました*"
        );
    }

    #[test]
    fn failure_message_includes_detail() {
        let msg = ENGLISH.failure_message("boom");
        assert!(msg.starts_with("An error occurred"));
        assert!(msg.ends_with("boom"));
    }
}
