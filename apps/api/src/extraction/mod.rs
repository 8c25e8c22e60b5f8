//! Document text extraction — turns an uploaded resume into plain text.
//!
//! The extractor sits behind the `DocumentExtractor` trait so the orchestrator
//! can be exercised with a stub. `PdfExtractor` is the production backend.

use bytes::Bytes;
use thiserror::Error;

pub mod pdf;

pub use pdf::PdfExtractor;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_EXTENSION: &str = ".pdf";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to load document: {0}")]
    Load(String),

    #[error("Document has no pages")]
    NoPages,
}

/// A single uploaded file, as declared by the client.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// True when the upload declares itself as a PDF, by content type or file extension.
    pub fn is_supported_format(&self) -> bool {
        let by_content_type = self
            .content_type
            .as_deref()
            .map(|ct| {
                ct.split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .eq_ignore_ascii_case(PDF_CONTENT_TYPE)
            })
            .unwrap_or(false);

        let by_extension = self
            .file_name
            .as_deref()
            .map(|name| name.to_ascii_lowercase().ends_with(PDF_EXTENSION))
            .unwrap_or(false);

        by_content_type || by_extension
    }

    /// Browsers submit an empty, unnamed file part when nothing was selected.
    pub fn is_blank(&self) -> bool {
        self.bytes.is_empty() && self.file_name.as_deref().map_or(true, str::is_empty)
    }
}

/// Plain text of every page, concatenated in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

/// Converts an uploaded document into plain text.
///
/// Implementations are synchronous and may be CPU-heavy; callers run them on
/// the blocking pool.
pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, document: &UploadedDocument) -> Result<ExtractedText, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: Option<&str>, content_type: Option<&str>, bytes: &'static [u8]) -> UploadedDocument {
        UploadedDocument::new(
            name.map(String::from),
            content_type.map(String::from),
            Bytes::from_static(bytes),
        )
    }

    #[test]
    fn test_pdf_content_type_is_supported() {
        assert!(doc(None, Some("application/pdf"), b"x").is_supported_format());
        assert!(doc(None, Some("Application/PDF; charset=binary"), b"x").is_supported_format());
    }

    #[test]
    fn test_pdf_extension_is_supported_without_content_type() {
        assert!(doc(Some("Resume.PDF"), None, b"x").is_supported_format());
        assert!(doc(Some("resume.pdf"), Some("application/octet-stream"), b"x").is_supported_format());
    }

    #[test]
    fn test_other_formats_are_rejected() {
        assert!(!doc(Some("resume.docx"), Some("application/msword"), b"x").is_supported_format());
        assert!(!doc(None, None, b"x").is_supported_format());
    }

    #[test]
    fn test_blank_upload_detection() {
        assert!(doc(Some(""), Some("application/octet-stream"), b"").is_blank());
        assert!(doc(None, None, b"").is_blank());
        assert!(!doc(Some("resume.pdf"), None, b"").is_blank());
    }
}
