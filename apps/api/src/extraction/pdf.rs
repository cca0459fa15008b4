use bytes::Bytes;

use crate::extraction::{DocumentFormat, ExtractionError};

/// Extracts text from PDF bytes. Blocking; call from `spawn_blocking`.
pub fn extract_pdf_text(bytes: &Bytes) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Unreadable {
        format: DocumentFormat::Pdf,
        reason: e.to_string(),
    })
}

