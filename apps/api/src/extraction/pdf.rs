use super::ExtractionError;

/// Extracts the text layer of a PDF held in memory.
/// Blocking, and the parser may panic on hostile input; call through
/// `extract_document`, which runs it on the blocking pool.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Unreadable(format!("PDF extraction error: {e}")))
}
