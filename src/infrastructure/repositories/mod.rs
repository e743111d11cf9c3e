pub mod google_tts_repository;
pub mod pdf_text_extractor;
pub mod polly_tts_repository;
pub mod text_extractor;
pub mod tts_repository;

pub use google_tts_repository::{GoogleCredentials, GoogleTtsRepository, ServiceAccountKey};
pub use pdf_text_extractor::PdfTextExtractor;
pub use polly_tts_repository::PollyTtsRepository;
pub use text_extractor::TextExtractor;
pub use tts_repository::{TtsProviderError, TtsRepository};
