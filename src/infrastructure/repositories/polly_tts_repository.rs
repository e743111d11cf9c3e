use super::tts_repository::{TtsProviderError, TtsRepository};
use crate::domain::tts::PollyEngine;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
pub const MAX_CHUNK_CHARS: usize = 3000;

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
    voice_id: String,
    engine: PollyEngine,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>, voice_id: String, engine: PollyEngine) -> Self {
        Self {
            polly_client,
            voice_id,
            engine,
        }
    }

    fn engine(&self) -> Engine {
        match self.engine {
            PollyEngine::Neural => Engine::Neural,
            PollyEngine::Standard => Engine::Standard,
        }
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsProviderError> {
        let voice_id = VoiceId::from(self.voice_id.as_str());
        let engine = self.engine();

        tracing::debug!(
            voice_id = ?voice_id,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id.clone())
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    voice_id = ?voice_id,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                TtsProviderError::Request(format!("AWS Polly error: {}", e))
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            TtsProviderError::Decode(format!("failed to read audio stream: {}", e))
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Audio stream collected successfully"
        );

        Ok(audio_bytes)
    }

    fn max_chunk_chars(&self) -> usize {
        MAX_CHUNK_CHARS
    }

    fn name(&self) -> &'static str {
        "polly"
    }
}
