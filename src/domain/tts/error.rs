use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("Text-to-Speech failed: {0}")]
    Dependency(String),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::Dependency(msg) => {
                AppError::ExternalService(format!("Text-to-Speech failed: {}", msg))
            }
            TtsServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
