//! Document Text Extractor — turns an uploaded PDF, DOCX or plain-text file
//! into the plain text the pipeline feeds to the prompt builder.
//!
//! An extraction that yields only whitespace is an error, never an empty
//! but valid document.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

pub mod docx;
pub mod pdf;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_MIME: &str = "text/plain";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Could not read document: {0}")]
    Unreadable(String),

    #[error("No text could be extracted from the document")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Maps a declared MIME type to a document kind. Parameters such as
    /// `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Result<Self, ExtractionError> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            PDF_MIME => Ok(DocumentKind::Pdf),
            DOCX_MIME => Ok(DocumentKind::Docx),
            TEXT_MIME => Ok(DocumentKind::PlainText),
            _ => Err(ExtractionError::UnsupportedFormat(mime.to_string())),
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            DocumentKind::Pdf => PDF_MIME,
            DocumentKind::Docx => DOCX_MIME,
            DocumentKind::PlainText => TEXT_MIME,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    /// Resolves the kind of an upload. The declared content type wins; the
    /// file extension is only consulted when the type is missing or generic.
    pub fn detect(
        content_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<Self, ExtractionError> {
        match content_type.map(str::trim).filter(|ct| !ct.is_empty()) {
            Some(ct) if !ct.starts_with("application/octet-stream") => Self::from_mime(ct),
            declared => file_name
                .and_then(Self::from_file_name)
                .ok_or_else(|| {
                    ExtractionError::UnsupportedFormat(
                        declared
                            .or(file_name)
                            .unwrap_or("unknown")
                            .to_string(),
                    )
                }),
        }
    }
}

/// Extracts plain text from `bytes` declared as `mime`.
pub async fn extract(bytes: Bytes, mime: &str) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_mime(mime)?;
    extract_document(bytes, kind).await
}

/// Extracts plain text from a document whose kind is already known.
/// PDF and DOCX parsing runs on the blocking pool.
pub async fn extract_document(bytes: Bytes, kind: DocumentKind) -> Result<String, ExtractionError> {
    let size = bytes.len();

    let text = match kind {
        DocumentKind::PlainText => decode_plain_text(&bytes)?,
        DocumentKind::Pdf | DocumentKind::Docx => {
            tokio::task::spawn_blocking(move || match kind {
                DocumentKind::Pdf => pdf::extract_pdf(&bytes),
                _ => docx::extract_docx(&bytes),
            })
            .await
            .map_err(|e| {
                if e.is_panic() {
                    ExtractionError::Unreadable(format!("{kind:?} parser aborted on this file"))
                } else {
                    ExtractionError::Unreadable(format!("extraction task failed: {e}"))
                }
            })??
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionError::Empty);
    }

    debug!("Extracted {} chars from {size}-byte {kind:?}", text.chars().count());
    Ok(text.to_string())
}

fn decode_plain_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8(bytes.to_vec())
        .map_err(|_| ExtractionError::Unreadable("plain text is not valid UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_accepts_supported_types() {
        assert_eq!(DocumentKind::from_mime(PDF_MIME).unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_mime(DOCX_MIME).unwrap(), DocumentKind::Docx);
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8").unwrap(),
            DocumentKind::PlainText
        );
        assert_eq!(
            DocumentKind::from_mime("Application/PDF").unwrap(),
            DocumentKind::Pdf
        );
    }

    #[test]
    fn test_from_mime_rejects_other_types() {
        for mime in ["image/png", "application/msword", "text/html", ""] {
            assert!(matches!(
                DocumentKind::from_mime(mime),
                Err(ExtractionError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn test_detect_prefers_declared_type() {
        let kind = DocumentKind::detect(Some(PDF_MIME), Some("resume.docx")).unwrap();
        assert_eq!(kind, DocumentKind::Pdf);

        let err = DocumentKind::detect(Some("image/jpeg"), Some("resume.pdf")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(
            DocumentKind::detect(Some("application/octet-stream"), Some("CV.DOCX")).unwrap(),
            DocumentKind::Docx
        );
        assert_eq!(
            DocumentKind::detect(None, Some("notes.txt")).unwrap(),
            DocumentKind::PlainText
        );
        assert!(DocumentKind::detect(None, Some("photo.png")).is_err());
        assert!(DocumentKind::detect(None, None).is_err());
    }

    #[tokio::test]
    async fn test_plain_text_is_returned_trimmed() {
        let text = extract(Bytes::from_static(b"\xEF\xBB\xBF  Jane Doe\nEngineer \n"), TEXT_MIME)
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nEngineer");
    }

    #[tokio::test]
    async fn test_whitespace_only_text_is_an_error() {
        let err = extract(Bytes::from_static(b" \n\t "), TEXT_MIME).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));

        let err = extract(Bytes::new(), TEXT_MIME).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_unreadable() {
        let err = extract(Bytes::from_static(&[0xff, 0xfe, 0x00]), TEXT_MIME)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable(_)));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_unreadable() {
        let err = extract(Bytes::from_static(b"definitely not a pdf"), PDF_MIME)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable(_)));
    }

    #[tokio::test]
    async fn test_pdf_text_layer_is_extracted() {
        let bytes = pdf::tests::pdf_with_content(
            "BT /F1 12 Tf 72 720 Td (Jane Doe Rust engineer) Tj ET",
        );
        let text = extract(Bytes::from(bytes), PDF_MIME).await.unwrap();
        assert_eq!(text, "Jane Doe Rust engineer");
    }

    #[tokio::test]
    async fn test_pdf_without_text_is_empty() {
        let bytes = pdf::tests::pdf_with_content("");
        let err = extract(Bytes::from(bytes), PDF_MIME).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[tokio::test]
    async fn test_docx_with_only_empty_paragraphs_is_empty() {
        let bytes = docx::tests::docx_with_body("<w:p/><w:p/>");
        let err = extract(Bytes::from(bytes), DOCX_MIME).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[tokio::test]
    async fn test_docx_runs_on_blocking_pool() {
        let bytes = docx::tests::docx_with_body(
            "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p><w:p><w:r><w:t>Rust engineer</w:t></w:r></w:p>",
        );
        let text = extract(Bytes::from(bytes), DOCX_MIME).await.unwrap();
        assert_eq!(text, "Jane Doe\nRust engineer");
    }

    #[tokio::test]
    async fn test_unsupported_mime_is_rejected_before_parsing() {
        let err = extract(Bytes::from_static(b"GIF89a"), "image/gif")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ref m) if m == "image/gif"));
    }
}
