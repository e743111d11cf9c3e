use async_trait::async_trait;

/// Failure reported by a TTS provider for a single chunk
#[derive(Debug, thiserror::Error)]
pub enum TtsProviderError {
    #[error("request to TTS provider failed: {0}")]
    Request(String),
    #[error("TTS provider returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("TTS provider authentication failed: {0}")]
    Auth(String),
    #[error("could not decode audio returned by TTS provider: {0}")]
    Decode(String),
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google Cloud, AWS Polly, ...)
///
/// Implementations synthesize exactly one chunk per call. Splitting text to fit
/// `max_chunk_chars` and joining the returned audio is done by the caller.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize a single chunk of text
    ///
    /// Returns MP3 audio for the chunk. An empty buffer is a valid result.
    ///
    /// # Errors
    /// Returns error if the provider rejects the request or is unavailable
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsProviderError>;

    /// Largest chunk, in characters, the provider accepts in one request
    fn max_chunk_chars(&self) -> usize;

    /// Provider name used in logs and readiness checks
    fn name(&self) -> &'static str;
}
