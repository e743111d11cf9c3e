use serde::{Deserialize, Serialize};

/// Request for POST /api/convert
#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertTextRequest {
    #[serde(default)]
    pub text: String,
}

/// Response for POST /api/convert
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertTextResponse {
    /// `data:audio/mp3;base64,...` URL playable directly by the browser
    pub audio_url: String,
    pub chunks_processed: usize,
    pub total_characters: usize,
    pub audio_size: usize,
}
