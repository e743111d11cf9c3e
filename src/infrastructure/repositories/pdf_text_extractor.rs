use super::text_extractor::TextExtractor;
use crate::domain::document::DocumentError;
use async_trait::async_trait;
use std::time::Instant;

/// PDF implementation of text extraction, backed by `pdf-extract`
#[derive(Debug, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<String, DocumentError> {
        let start_time = Instant::now();
        let size_bytes = bytes.len();

        // Parsing is CPU bound and the parser can panic on malformed files
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| DocumentError::Parse(format!("parser aborted: {}", e)))?
            .map_err(|e| DocumentError::Parse(e.to_string()))?;

        tracing::info!(
            size_bytes,
            text_length = text.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "PDF parsed"
        );

        Ok(text)
    }
}
