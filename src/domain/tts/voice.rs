use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Voice gender requested from Google Cloud Text-to-Speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SsmlGender {
    Male,
    Female,
    Neutral,
}

impl FromStr for SsmlGender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MALE" => Ok(SsmlGender::Male),
            "FEMALE" => Ok(SsmlGender::Female),
            "NEUTRAL" => Ok(SsmlGender::Neutral),
            other => Err(format!("unknown SSML gender: {}", other)),
        }
    }
}

/// Voice and audio parameters sent with every synthesis request
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSettings {
    pub language_code: String,
    pub voice_name: String,
    pub ssml_gender: SsmlGender,
    pub speaking_rate: f32,
    pub pitch: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            language_code: "en-US".to_string(),
            voice_name: "en-US-Standard-D".to_string(),
            ssml_gender: SsmlGender::Neutral,
            speaking_rate: 1.0,
            pitch: 0.0,
        }
    }
}

/// AWS Polly synthesis engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollyEngine {
    Neural,
    Standard,
}

impl FromStr for PollyEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "neural" => Ok(PollyEngine::Neural),
            "standard" => Ok(PollyEngine::Standard),
            other => Err(format!("unknown Polly engine: {}", other)),
        }
    }
}
