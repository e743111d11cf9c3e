use serde::{Deserialize, Serialize};

/// Response for POST /api/convert-file when no audio is requested
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedTextResponse {
    pub success: bool,
    pub text: String,
    pub text_length: usize,
    pub file_name: Option<String>,
    pub method: String,
}

impl ExtractedTextResponse {
    pub const TEXT_EXTRACTION_ONLY: &'static str = "text-extraction-only";
}
