use readaloud_backend::{
    controllers::convert::ConvertController,
    domain::{
        document::DocumentService,
        tts::{PollyEngine, SynthesisOptions, TtsService, VoiceSettings},
    },
    infrastructure::{
        config::{Config, Environment, LogFormat, TtsProvider},
        http::build_router,
        repositories::{google_tts_repository, PdfTextExtractor},
    },
};
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod fake_tts;

use api_client::TestClient;
use fake_tts::FakeTts;

/// Chunk limit used by the fake provider, small enough that short texts get split
pub const TEST_MAX_CHUNK_CHARS: usize = 40;
pub const TEST_MAX_TEXT_CHARS: usize = 2_000;
pub const TEST_MAX_UPLOAD_BYTES: usize = 16 * 1024;

pub struct TestContext {
    pub client: TestClient,
    pub tts: Arc<FakeTts>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let config = test_config();
            let tts = Arc::new(FakeTts::new(TEST_MAX_CHUNK_CHARS));

            let options = SynthesisOptions::for_repository(
                tts.as_ref(),
                config.tts_max_chunk_chars,
                config.tts_max_concurrency,
                Duration::from_millis(config.tts_request_delay_ms),
            );
            let tts_service = Arc::new(TtsService::new(tts.clone(), options));
            let document_service =
                Arc::new(DocumentService::new(Arc::new(PdfTextExtractor::new())));
            let convert_controller = Arc::new(ConvertController::new(
                tts_service.clone(),
                document_service,
                config.max_text_chars,
            ));
            let app = build_router(&config, convert_controller, tts_service);

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                client: TestClient::new(&base_url),
                tts,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // The server task is dropped with the runtime
        }
    }
}

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0, // Will be assigned by the OS
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
        tts_provider: TtsProvider::Google,
        google_api_key: Some("test-api-key".to_string()),
        gcp_credentials: None,
        gcp_credentials_file: None,
        google_tts_base_url: google_tts_repository::DEFAULT_BASE_URL.to_string(),
        voice: VoiceSettings::default(),
        aws_region: "us-east-1".to_string(),
        polly_voice_id: "Joanna".to_string(),
        polly_engine: PollyEngine::Neural,
        tts_max_chunk_chars: None,
        tts_max_concurrency: 1,
        tts_request_delay_ms: 0, // No pacing needed against the fake provider
        max_text_chars: TEST_MAX_TEXT_CHARS,
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        cors_allowed_origin: "*".to_string(),
    }
}
