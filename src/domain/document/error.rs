use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("PDF parsing failed: {0}")]
    Parse(String),
    #[error("No text found in PDF")]
    NoText,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Parse(_) | DocumentError::NoText => AppError::BadRequest(err.to_string()),
            DocumentError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
