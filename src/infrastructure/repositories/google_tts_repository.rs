use super::tts_repository::{TtsProviderError, TtsRepository};
use crate::domain::tts::{SsmlGender, VoiceSettings};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Google Cloud TTS rejects input over 5000 bytes; stay well below it
pub const MAX_CHUNK_CHARS: usize = 4500;

pub const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";

const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Refresh cached tokens this long before Google expires them
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Service account key file as downloaded from the Google Cloud console
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// How requests to Google Cloud Text-to-Speech are authorized
#[derive(Clone)]
pub enum GoogleCredentials {
    ApiKey(String),
    ServiceAccount(ServiceAccountKey),
}

impl GoogleCredentials {
    pub fn from_service_account_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(GoogleCredentials::ServiceAccount)
    }
}

impl std::fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoogleCredentials::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            GoogleCredentials::ServiceAccount(key) => f
                .debug_struct("ServiceAccount")
                .field("client_email", &key.client_email)
                .field("token_uri", &key.token_uri)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
    ssml_gender: SsmlGender,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f32,
    pitch: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: Option<String>,
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

/// Google Cloud Text-to-Speech implementation of TTS repository
pub struct GoogleTtsRepository {
    http: reqwest::Client,
    base_url: String,
    credentials: GoogleCredentials,
    voice: VoiceSettings,
    access_token: Mutex<Option<AccessToken>>,
}

impl GoogleTtsRepository {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        credentials: GoogleCredentials,
        voice: VoiceSettings,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
            voice,
            access_token: Mutex::new(None),
        }
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/text:synthesize", self.base_url.trim_end_matches('/'))
    }

    /// Return a cached OAuth token, exchanging a signed assertion for a new one when needed
    async fn service_account_token(
        &self,
        key: &ServiceAccountKey,
    ) -> Result<String, TtsProviderError> {
        let mut cached = self.access_token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() + TOKEN_REFRESH_MARGIN {
                return Ok(token.value.clone());
            }
        }

        let now = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &key.client_email,
            scope: CLOUD_PLATFORM_SCOPE,
            aud: &key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| TtsProviderError::Auth(format!("invalid service account key: {}", e)))?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(|e| TtsProviderError::Auth(format!("failed to sign assertion: {}", e)))?;

        let response = self
            .http
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| TtsProviderError::Auth(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TtsProviderError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TtsProviderError::Auth(format!("malformed token response: {}", e)))?;

        tracing::info!(
            client_email = %key.client_email,
            expires_in_secs = token.expires_in,
            "Obtained Google access token"
        );

        *cached = Some(AccessToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });

        Ok(token.access_token)
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsProviderError> {
        let body = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: &self.voice.language_code,
                name: &self.voice.voice_name,
                ssml_gender: self.voice.ssml_gender,
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                speaking_rate: self.voice.speaking_rate,
                pitch: self.voice.pitch,
            },
        };

        tracing::debug!(
            voice = %self.voice.voice_name,
            language = %self.voice.language_code,
            text_length = text.len(),
            "Calling Google Cloud text:synthesize"
        );

        let request = self.http.post(self.synthesize_url()).json(&body);
        let request = match &self.credentials {
            GoogleCredentials::ApiKey(key) => request.query(&[("key", key.as_str())]),
            GoogleCredentials::ServiceAccount(key) => {
                request.bearer_auth(self.service_account_token(key).await?)
            }
        };

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "Google Cloud TTS request failed");
            TtsProviderError::Request(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(status = status.as_u16(), body = %body, "Google Cloud TTS returned an error");
            return Err(TtsProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| TtsProviderError::Decode(e.to_string()))?;

        match payload.audio_content {
            Some(audio_content) => STANDARD
                .decode(audio_content)
                .map_err(|e| TtsProviderError::Decode(e.to_string())),
            None => {
                tracing::warn!(
                    text_length = text.len(),
                    "Google Cloud TTS returned no audio content for chunk"
                );
                Ok(Vec::new())
            }
        }
    }

    fn max_chunk_chars(&self) -> usize {
        MAX_CHUNK_CHARS
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
