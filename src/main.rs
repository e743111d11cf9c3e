use readaloud_backend::controllers::convert::ConvertController;
use readaloud_backend::domain::document::DocumentService;
use readaloud_backend::domain::tts::{SynthesisOptions, TtsService};
use readaloud_backend::infrastructure::config::{Config, LogFormat, TtsProvider};
use readaloud_backend::infrastructure::http::{build_router, start_http_server};
use readaloud_backend::infrastructure::repositories::{
    GoogleTtsRepository, PdfTextExtractor, PollyTtsRepository, TtsRepository,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting ReadAloud Backend on {}:{}",
        config.host,
        config.port
    );

    if config.is_development() {
        tracing::debug!(config = ?config.voice, provider = ?config.tts_provider, "Development configuration loaded");
    }

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate the TTS provider once for the whole process
    let tts_repo = create_tts_repository(&config).await?;
    tracing::info!(provider = tts_repo.name(), "TTS provider initialized");

    let options = SynthesisOptions::for_repository(
        tts_repo.as_ref(),
        config.tts_max_chunk_chars,
        config.tts_max_concurrency,
        Duration::from_millis(config.tts_request_delay_ms),
    );
    tracing::info!(
        max_chunk_chars = options.max_chunk_chars,
        max_concurrency = options.max_concurrency,
        request_delay_ms = options.request_delay.as_millis(),
        "Synthesis options"
    );

    // 2. Instantiate services
    let tts_service = Arc::new(TtsService::new(tts_repo, options));
    let document_service = Arc::new(DocumentService::new(Arc::new(PdfTextExtractor::new())));

    // 3. Instantiate controllers
    let convert_controller = Arc::new(ConvertController::new(
        tts_service.clone(),
        document_service,
        config.max_text_chars,
    ));

    // Start HTTP server with all routes
    let config = Arc::new(config);
    let app = build_router(&config, convert_controller, tts_service);
    start_http_server(config, app).await?;

    Ok(())
}

async fn create_tts_repository(
    config: &Config,
) -> Result<Arc<dyn TtsRepository>, Box<dyn std::error::Error>> {
    match config.tts_provider {
        TtsProvider::Google => {
            let credentials = config.google_credentials()?;
            tracing::info!(credentials = ?credentials, "Using Google Cloud Text-to-Speech");

            let http = reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()?;

            Ok(Arc::new(GoogleTtsRepository::new(
                http,
                config.google_tts_base_url.clone(),
                credentials,
                config.voice.clone(),
            )))
        }
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;

            tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));

            Ok(Arc::new(PollyTtsRepository::new(
                polly_client,
                config.polly_voice_id.clone(),
                config.polly_engine,
            )))
        }
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "readaloud_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
