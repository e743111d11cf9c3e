pub mod document;
pub mod tts;
