pub mod assembler;
pub mod chunker;
pub mod dto;
pub mod error;
pub mod service;
pub mod voice;

pub use assembler::{concatenate_segments, AssemblyError, OrderedSegments};
pub use chunker::{split_into_chunks, ChunkingError};
pub use error::TtsServiceError;
pub use service::{SynthesisOptions, TtsService, TtsServiceApi, TtsSynthesisResult};
pub use voice::{PollyEngine, SsmlGender, VoiceSettings};
