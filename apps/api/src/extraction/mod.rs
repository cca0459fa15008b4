//! Text extraction — turns an uploaded PDF or DOCX into plain text for the analysis engine.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>` so tests can swap in a stub.

pub mod docx;
pub mod format;
pub mod pdf;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use format::DocumentFormat;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}'. Please upload PDF or DOCX.")]
    UnsupportedFormat(String),

    #[error("Could not read {format} document: {reason}")]
    Unreadable {
        format: DocumentFormat,
        reason: String,
    },

    #[error("No text extracted from resume.")]
    NoText,
}

/// Pluggable text extraction backend.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, format: DocumentFormat, bytes: Bytes)
        -> Result<String, ExtractionError>;
}

/// Default backend: `pdf-extract` for PDF, ZIP + WordprocessingML scan for DOCX.
///
/// Both parsers are CPU-bound and run on the blocking pool. A parser panic on a
/// malformed file is reported as `Unreadable`.
pub struct DocumentTextExtractor;

#[async_trait]
impl TextExtractor for DocumentTextExtractor {
    async fn extract(
        &self,
        format: DocumentFormat,
        bytes: Bytes,
    ) -> Result<String, ExtractionError> {
        let text = tokio::task::spawn_blocking(move || match format {
            DocumentFormat::Pdf => pdf::extract_pdf_text(&bytes),
            DocumentFormat::Docx => docx::extract_docx_text(&bytes),
        })
        .await
        .map_err(|e| ExtractionError::Unreadable {
            format,
            reason: format!("parser aborted: {e}"),
        })??;

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::docx::tests::{build_docx, paragraph};
    use super::*;

    #[tokio::test]
    async fn test_docx_round_trip_through_extractor() {
        let body = format!("{}{}", paragraph("Jane Doe"), paragraph("jane@example.com"));
        let text = DocumentTextExtractor
            .extract(DocumentFormat::Docx, build_docx(&body))
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\njane@example.com");
    }

    #[tokio::test]
    async fn test_blank_docx_is_no_text() {
        let body = paragraph("   ");
        let err = DocumentTextExtractor
            .extract(DocumentFormat::Docx, build_docx(&body))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NoText));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_unreadable() {
        let err = DocumentTextExtractor
            .extract(DocumentFormat::Pdf, Bytes::from_static(b"%PDF-1.4 truncated"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Unreadable {
                format: DocumentFormat::Pdf,
                ..
            }
        ));
    }

    #[test]
    fn test_unsupported_message_names_the_file() {
        let err = ExtractionError::UnsupportedFormat("cv.txt".to_string());
        assert!(err.to_string().contains("cv.txt"));
        assert!(err.to_string().contains("PDF or DOCX"));
    }
}
