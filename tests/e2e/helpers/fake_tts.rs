use async_trait::async_trait;
use parking_lot::Mutex;
use readaloud_backend::infrastructure::repositories::{TtsProviderError, TtsRepository};

/// Chunk text that makes the fake provider fail
pub const FAILING_MARKER: &str = "EXPLODE";

/// TTS provider that returns `[chunk]` as the audio for each chunk
pub struct FakeTts {
    calls: Mutex<Vec<String>>,
    max_chunk_chars: usize,
}

impl FakeTts {
    pub fn new(max_chunk_chars: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            max_chunk_chars,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Audio the fake produces for a sequence of chunks
    pub fn audio_for(chunks: &[String]) -> Vec<u8> {
        chunks
            .iter()
            .flat_map(|chunk| format!("[{}]", chunk).into_bytes())
            .collect()
    }
}

#[async_trait]
impl TtsRepository for FakeTts {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsProviderError> {
        self.calls.lock().push(text.to_string());

        if text.contains(FAILING_MARKER) {
            return Err(TtsProviderError::Api {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }

        Ok(format!("[{}]", text).into_bytes())
    }

    fn max_chunk_chars(&self) -> usize {
        self.max_chunk_chars
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
