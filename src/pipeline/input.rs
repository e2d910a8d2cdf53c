//! Input resolution: turn a user selection into an in-memory [`SourceFile`].
//!
//! The whole file is read into memory; there is no streaming and no size cap.
//! The media type follows what a browser file picker reports (derived from
//! the extension), with a `%PDF` magic-byte sniff for extension-less paths.
//! Only `application/pdf` passes [`SourceFile::ensure_pdf`].

use crate::error::Pdf2NoteError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The only media type the pipeline accepts.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Media type reported for anything that is not recognisably a PDF.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// A selected file: its display name, its media type and its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name as shown to the user (no directory part).
    pub name: String,
    /// Media type as reported by the picker, e.g. `application/pdf`.
    pub media_type: String,
    /// Complete file contents.
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Build a source whose media type is detected from `name` and `bytes`.
    pub fn detect(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = detect_media_type(Path::new(&name), &bytes).to_string();
        Self {
            name,
            media_type,
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
    }

    /// Fail with [`Pdf2NoteError::NotAPdf`] unless the media type is
    /// `application/pdf`.
    pub fn ensure_pdf(&self) -> Result<(), Pdf2NoteError> {
        if self.is_pdf() {
            Ok(())
        } else {
            Err(Pdf2NoteError::NotAPdf {
                name: self.name.clone(),
                media_type: self.media_type.clone(),
            })
        }
    }
}

/// Guess a media type the way a file picker would.
///
/// A `.pdf` extension (any case) means `application/pdf`; any other
/// extension does not. Without an extension the first bytes decide.
pub fn detect_media_type(path: &Path, bytes: &[u8]) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        Some(_) => FALLBACK_MEDIA_TYPE,
        None if bytes.starts_with(PDF_MAGIC) => PDF_MEDIA_TYPE,
        None => FALLBACK_MEDIA_TYPE,
    }
}

/// Read a local file into a [`SourceFile`].
///
/// This is the only suspending step of a conversion. `media_type` overrides
/// detection when given.
pub async fn read_source(
    path: impl AsRef<Path>,
    media_type: Option<&str>,
) -> Result<SourceFile, Pdf2NoteError> {
    let path = path.as_ref();

    let bytes = tokio::fs::read(path).await.map_err(|e| read_error(path, e))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let source = match media_type {
        Some(mt) => SourceFile::new(name, mt, bytes),
        None => SourceFile::detect(name, bytes),
    };

    debug!(
        "Read '{}' ({} bytes, {})",
        path.display(),
        source.bytes.len(),
        source.media_type
    );
    Ok(source)
}

fn read_error(path: &Path, e: std::io::Error) -> Pdf2NoteError {
    let path = PathBuf::from(path);
    match e.kind() {
        std::io::ErrorKind::NotFound => Pdf2NoteError::FileNotFound { path },
        std::io::ErrorKind::PermissionDenied => Pdf2NoteError::PermissionDenied { path },
        _ => Pdf2NoteError::ReadFailed { path, source: e },
    }
}
