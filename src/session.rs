//! View state for a single-document front end.
//!
//! The pipeline itself is stateless; a UI still needs to remember which file
//! is selected, whether a conversion is running, what the last result or
//! error was. [`Session`] holds exactly that and nothing more, and applies the
//! rules of the web front end:
//!
//! - one document at a time; a new result replaces the previous one
//! - a non-PDF selection shows the fixed rejection message and converts nothing
//! - a failure becomes a display string and resets the loading flag
//! - results are applied last-request-wins: a conversion that finishes after
//!   a newer one was started is dropped, without cancelling anything

use crate::config::ConversionConfig;
use crate::convert::convert;
use crate::error::Pdf2NoteError;
use crate::output::ConversionOutput;
use crate::pipeline::input::SourceFile;
use crate::template::Language;
use tracing::debug;

/// Handle for one started conversion. Only the most recent ticket can
/// deliver a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What a front end renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Name of the selected file, if any.
    pub file_name: Option<String>,
    /// Result of the last successful conversion.
    pub output: Option<ConversionOutput>,
    /// Localized error message to display.
    pub error: Option<String>,
    /// A conversion is in flight.
    pub loading: bool,
}

/// Single-document view-state store.
#[derive(Debug, Default)]
pub struct Session {
    language: Language,
    generation: u64,
    state: ViewState,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            generation: 0,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The current note, for copy actions.
    pub fn markdown(&self) -> Option<&str> {
        self.state.output.as_ref().map(|o| o.markdown.as_str())
    }

    /// Suggested file name and contents for a download action.
    pub fn download(&self) -> Option<(&str, &str)> {
        self.state
            .output
            .as_ref()
            .map(|o| (o.download_name.as_str(), o.markdown.as_str()))
    }

    /// Register a new selection.
    ///
    /// Returns a [`Ticket`] when the file is a PDF and a conversion should
    /// start. For anything else the rejection message is shown, the previous
    /// selection stays, and `None` is returned.
    pub fn select(&mut self, file: &SourceFile) -> Option<Ticket> {
        if !file.is_pdf() {
            debug!("Rejected '{}' ({})", file.name, file.media_type);
            self.state.error = Some(self.language.template().rejection_message());
            return None;
        }

        self.generation += 1;
        self.state.file_name = Some(file.name.clone());
        self.state.error = None;
        self.state.loading = true;
        Some(Ticket(self.generation))
    }

    /// Deliver the result of the conversion started with `ticket`.
    ///
    /// Returns `false` (and changes nothing) when a newer conversion has been
    /// started since.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        result: Result<ConversionOutput, Pdf2NoteError>,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!(
                "Discarding stale result (ticket {}, current {})",
                ticket.0, self.generation
            );
            return false;
        }

        self.state.loading = false;
        match result {
            Ok(output) => {
                self.state.output = Some(output);
                self.state.error = None;
            }
            Err(e) => {
                self.state.output = None;
                self.state.error = Some(user_message(&e, self.language));
            }
        }
        true
    }

    /// Select `file`, convert it and apply the result in one go.
    pub fn run(&mut self, file: &SourceFile, config: &ConversionConfig) -> &ViewState {
        if let Some(ticket) = self.select(file) {
            let result = convert(file, config);
            self.finish(ticket, result);
        }
        &self.state
    }
}

/// The message a user should see for `err`.
pub fn user_message(err: &Pdf2NoteError, language: Language) -> String {
    let template = language.template();
    if err.is_rejection() {
        template.rejection_message()
    } else {
        template.failure_message(&err.to_string())
    }
}
