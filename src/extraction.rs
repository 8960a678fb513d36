//! Plain-text extraction for uploaded documents.

use async_trait::async_trait;
use thiserror::Error;

/// Reasons a document could not be turned into text. Messages are shown to the uploader.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// File name does not carry a supported extension.
    #[error("Only PDF files are supported")]
    UnsupportedFile,
    /// Parser rejected the document.
    #[error("Failed to read PDF: {0}")]
    Unreadable(String),
    /// Parser succeeded but the document holds no text (scanned or image-only).
    #[error("No text could be extracted from the PDF")]
    EmptyDocument,
}

/// Interface implemented by document-to-text backends.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the text content of `bytes`, uploaded under `file_name`.
    async fn extract_text(&self, file_name: &str, bytes: Vec<u8>)
    -> Result<String, ExtractionError>;
}

/// Returns true when `file_name` carries the `.pdf` suffix accepted by the upload endpoint.
pub fn is_pdf_name(file_name: &str) -> bool {
    file_name.ends_with(".pdf")
}

/// PDF backend powered by the `pdf-extract` crate.
///
/// Parsing is CPU-bound, so it runs on tokio's blocking pool. A panic inside the parser is
/// reported as an unreadable document rather than taking the worker down.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Construct a new PDF extractor.
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ExtractionError> {
        if !is_pdf_name(file_name) {
            return Err(ExtractionError::UnsupportedFile);
        }
        let size = bytes.len();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|error| ExtractionError::Unreadable(format!("parser aborted: {error}")))?
            .map_err(|error| ExtractionError::Unreadable(error.to_string()))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }
        tracing::debug!(file_name, size, chars = text.len(), "Extracted PDF text");
        Ok(text.to_string())
    }
}
