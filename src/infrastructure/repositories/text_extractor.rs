use crate::domain::document::DocumentError;
use async_trait::async_trait;

/// Pulls plain text out of an uploaded document
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the raw text of the document, before any normalization
    ///
    /// # Errors
    /// Returns `DocumentError::Parse` if the document cannot be read
    async fn extract(&self, bytes: Vec<u8>) -> Result<String, DocumentError>;
}
