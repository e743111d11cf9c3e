use super::assembler::{concatenate_segments, OrderedSegments};
use super::chunker::{char_len, split_into_chunks};
use super::error::TtsServiceError;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TtsSynthesisResult {
    pub audio_data: Vec<u8>,
    pub chunks_processed: usize,
    pub total_characters: usize,
}

/// How text is split and dispatched to the TTS provider
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOptions {
    pub max_chunk_chars: usize,
    /// 1 means chunks are synthesized one after another
    pub max_concurrency: usize,
    /// Pause between consecutive requests when synthesizing sequentially
    pub request_delay: Duration,
}

impl SynthesisOptions {
    /// Options for a provider, using its own chunk limit unless overridden
    pub fn for_repository(
        tts_repo: &dyn TtsRepository,
        max_chunk_chars: Option<usize>,
        max_concurrency: usize,
        request_delay: Duration,
    ) -> Self {
        Self {
            max_chunk_chars: max_chunk_chars.unwrap_or_else(|| tts_repo.max_chunk_chars()),
            max_concurrency: max_concurrency.max(1),
            request_delay,
        }
    }
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    options: SynthesisOptions,
}

impl TtsService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, options: SynthesisOptions) -> Self {
        Self { tts_repo, options }
    }

    pub fn provider_name(&self) -> &'static str {
        self.tts_repo.name()
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize text of any length to a single MP3 buffer
    ///
    /// This operation:
    /// - Rejects blank text
    /// - Splits the text into chunks the provider accepts
    /// - Synthesizes every chunk
    /// - Joins the audio in chunk order
    async fn synthesize(&self, text: &str) -> Result<TtsSynthesisResult, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(&self, text: &str) -> Result<TtsSynthesisResult, TtsServiceError> {
        if text.trim().is_empty() {
            return Err(TtsServiceError::Invalid("Text is required".to_string()));
        }

        let start_time = Instant::now();
        let total_characters = char_len(text);

        // 1. Split into provider-sized chunks
        let chunks = split_into_chunks(text, self.options.max_chunk_chars)
            .map_err(|e| TtsServiceError::Other(e.into()))?;

        tracing::info!(
            provider = self.tts_repo.name(),
            chunk_count = chunks.len(),
            total_characters,
            max_chunk_chars = self.options.max_chunk_chars,
            "Text split into chunks"
        );

        // 2. Synthesize each chunk, keeping chunk order
        let segments = if self.options.max_concurrency > 1 {
            self.synthesize_concurrently(&chunks).await?
        } else {
            self.synthesize_sequentially(&chunks).await?
        };

        // 3. Join the audio
        let audio_data =
            concatenate_segments(&segments).map_err(|e| TtsServiceError::Other(e.into()))?;

        let duration = start_time.elapsed();
        tracing::info!(
            provider = self.tts_repo.name(),
            latency_ms = duration.as_millis(),
            total_characters,
            chunk_count = chunks.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(TtsSynthesisResult {
            audio_data,
            chunks_processed: chunks.len(),
            total_characters,
        })
    }
}

impl TtsService {
    async fn synthesize_sequentially(
        &self,
        chunks: &[String],
    ) -> Result<Vec<Vec<u8>>, TtsServiceError> {
        let mut segments = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 && !self.options.request_delay.is_zero() {
                tokio::time::sleep(self.options.request_delay).await;
            }

            let segment = self.synthesize_chunk(index, chunk).await?;
            segments.push(segment);
        }

        Ok(segments)
    }

    /// Dispatch up to `max_concurrency` requests at once. Segments are slotted by
    /// chunk index, so completion order never affects the final audio.
    async fn synthesize_concurrently(
        &self,
        chunks: &[String],
    ) -> Result<Vec<Vec<u8>>, TtsServiceError> {
        let mut slots = OrderedSegments::with_len(chunks.len());

        let mut completed = stream::iter(0..chunks.len())
            .map(|index| async move { (index, self.synthesize_chunk(index, &chunks[index]).await) })
            .buffer_unordered(self.options.max_concurrency);

        while let Some((index, result)) = completed.next().await {
            slots
                .insert(index, result?)
                .map_err(|e| TtsServiceError::Other(e.into()))?;
        }

        slots
            .into_ordered()
            .map_err(|e| TtsServiceError::Other(e.into()))
    }

    async fn synthesize_chunk(&self, index: usize, chunk: &str) -> Result<Vec<u8>, TtsServiceError> {
        tracing::debug!(
            chunk_index = index,
            chunk_chars = char_len(chunk),
            "Synthesizing chunk"
        );

        let segment = self.tts_repo.synthesize(chunk).await.map_err(|e| {
            tracing::error!(chunk_index = index, error = %e, "Chunk synthesis failed");
            TtsServiceError::Dependency(e.to_string())
        })?;

        tracing::debug!(
            chunk_index = index,
            segment_size = segment.len(),
            "Chunk synthesized"
        );

        Ok(segment)
    }
}
