pub mod dto;
pub mod error;
pub mod service;

pub use dto::ExtractedTextResponse;
pub use error::DocumentError;
pub use service::{audio_file_name, DocumentService, UploadKind, UploadedFile};
