use crate::domain::tts::{PollyEngine, SsmlGender, VoiceSettings};
use crate::infrastructure::repositories::google_tts_repository::{self, GoogleCredentials};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub tts_provider: TtsProvider,
    // Google Cloud Text-to-Speech
    pub google_api_key: Option<String>,
    pub gcp_credentials: Option<String>,
    pub gcp_credentials_file: Option<String>,
    pub google_tts_base_url: String,
    pub voice: VoiceSettings,
    // AWS Polly
    pub aws_region: String,
    pub polly_voice_id: String,
    pub polly_engine: PollyEngine,
    // Chunking and dispatch
    pub tts_max_chunk_chars: Option<usize>,
    pub tts_max_concurrency: usize,
    pub tts_request_delay_ms: u64,
    // Request limits
    pub max_text_chars: usize,
    pub max_upload_bytes: usize,
    pub cors_allowed_origin: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Google,
    Polly,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            tts_provider: match env::var("TTS_PROVIDER")
                .unwrap_or_else(|_| "google".to_string())
                .to_lowercase()
                .as_str()
            {
                "google" => TtsProvider::Google,
                "polly" => TtsProvider::Polly,
                other => return Err(format!("unsupported TTS_PROVIDER: {}", other).into()),
            },
            google_api_key: non_empty_var("GOOGLE_TTS_API_KEY"),
            gcp_credentials: non_empty_var("GCP_CREDENTIALS"),
            gcp_credentials_file: non_empty_var("GCP_CREDENTIALS_FILE"),
            google_tts_base_url: env::var("GOOGLE_TTS_BASE_URL")
                .unwrap_or_else(|_| google_tts_repository::DEFAULT_BASE_URL.to_string()),
            voice: voice_from_env()?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            polly_voice_id: env::var("POLLY_VOICE_ID").unwrap_or_else(|_| "Joanna".to_string()),
            polly_engine: env::var("POLLY_ENGINE")
                .unwrap_or_else(|_| "neural".to_string())
                .parse::<PollyEngine>()?,
            tts_max_chunk_chars: non_empty_var("TTS_MAX_CHUNK_CHARS")
                .map(|v| v.parse::<usize>())
                .transpose()?,
            tts_max_concurrency: env::var("TTS_MAX_CONCURRENCY")
                .unwrap_or_else(|_| "1".to_string())
                .parse()?,
            tts_request_delay_ms: env::var("TTS_REQUEST_DELAY_MS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()?,
            max_text_chars: env::var("MAX_TEXT_CHARS")
                .unwrap_or_else(|_| "100000".to_string())
                .parse()?,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (20 * 1024 * 1024).to_string())
                .parse()?,
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| "*".to_string()),
        };

        if config.tts_max_chunk_chars == Some(0) {
            return Err("TTS_MAX_CHUNK_CHARS must be at least 1".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Resolve Google credentials: inline service account JSON, then a key file, then an API key
    pub fn google_credentials(&self) -> Result<GoogleCredentials, Box<dyn std::error::Error>> {
        if let Some(json) = &self.gcp_credentials {
            return Ok(GoogleCredentials::from_service_account_json(json)?);
        }

        if let Some(path) = &self.gcp_credentials_file {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read GCP_CREDENTIALS_FILE {}: {}", path, e))?;
            return Ok(GoogleCredentials::from_service_account_json(&json)?);
        }

        if let Some(key) = &self.google_api_key {
            return Ok(GoogleCredentials::ApiKey(key.clone()));
        }

        Err("Missing Google credentials: set GCP_CREDENTIALS, GCP_CREDENTIALS_FILE or GOOGLE_TTS_API_KEY".into())
    }
}

fn voice_from_env() -> Result<VoiceSettings, Box<dyn std::error::Error>> {
    let defaults = VoiceSettings::default();

    Ok(VoiceSettings {
        language_code: env::var("TTS_LANGUAGE_CODE").unwrap_or(defaults.language_code),
        voice_name: env::var("TTS_VOICE_NAME").unwrap_or(defaults.voice_name),
        ssml_gender: match env::var("TTS_SSML_GENDER") {
            Ok(value) => value.parse::<SsmlGender>()?,
            Err(_) => defaults.ssml_gender,
        },
        speaking_rate: match env::var("TTS_SPEAKING_RATE") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.speaking_rate,
        },
        pitch: match env::var("TTS_PITCH") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.pitch,
        },
    })
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
