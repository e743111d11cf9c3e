use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    domain::{
        document::{audio_file_name, DocumentService, ExtractedTextResponse, UploadKind, UploadedFile},
        tts::{
            chunker::char_len,
            dto::{ConvertTextRequest, ConvertTextResponse},
            TtsService, TtsServiceApi,
        },
    },
    error::{AppError, AppResult},
};

/// Multipart form of POST /api/convert-file
struct ConvertFileForm {
    file: Option<(Option<String>, Vec<u8>)>,
    generate_audio: bool,
    is_text_file: bool,
}

pub struct ConvertController {
    tts_service: Arc<TtsService>,
    document_service: Arc<DocumentService>,
    max_text_chars: usize,
}

impl ConvertController {
    pub fn new(
        tts_service: Arc<TtsService>,
        document_service: Arc<DocumentService>,
        max_text_chars: usize,
    ) -> Self {
        Self {
            tts_service,
            document_service,
            max_text_chars,
        }
    }

    /// POST /api/convert - Convert text to a playable audio data URL
    pub async fn convert_text(
        State(controller): State<Arc<ConvertController>>,
        Json(request): Json<ConvertTextRequest>,
    ) -> AppResult<Json<ConvertTextResponse>> {
        controller.check_text_length(&request.text)?;

        let result = controller.tts_service.synthesize(&request.text).await?;

        let audio_url = format!(
            "data:audio/mp3;base64,{}",
            STANDARD.encode(&result.audio_data)
        );

        Ok(Json(ConvertTextResponse {
            audio_url,
            chunks_processed: result.chunks_processed,
            total_characters: result.total_characters,
            audio_size: result.audio_data.len(),
        }))
    }

    /// POST /api/convert-file - Extract text from an upload and optionally return it as MP3
    pub async fn convert_file(
        State(controller): State<Arc<ConvertController>>,
        multipart: Multipart,
    ) -> AppResult<Response> {
        let form = read_form(multipart).await?;

        let Some((file_name, bytes)) = form.file else {
            return Err(AppError::BadRequest("No file uploaded.".to_string()));
        };

        let kind = if form.is_text_file {
            UploadKind::PlainText
        } else {
            UploadKind::Pdf
        };

        tracing::info!(
            file_name = file_name.as_deref().unwrap_or("<unnamed>"),
            size_bytes = bytes.len(),
            kind = ?kind,
            generate_audio = form.generate_audio,
            "File conversion request"
        );

        let text = controller
            .document_service
            .extract_text(UploadedFile {
                file_name: file_name.clone(),
                bytes,
                kind,
            })
            .await?;

        if !form.generate_audio {
            return Ok(Json(ExtractedTextResponse {
                success: true,
                text_length: char_len(&text),
                text,
                file_name,
                method: ExtractedTextResponse::TEXT_EXTRACTION_ONLY.to_string(),
            })
            .into_response());
        }

        controller.check_text_length(&text)?;
        let result = controller.tts_service.synthesize(&text).await?;
        let download_name = audio_file_name(file_name.as_deref(), Utc::now());

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&format!("attachment; filename=\"{}\"", download_name))
                .map_err(|e| AppError::Internal(format!("invalid file name header: {}", e)))?,
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(result.audio_data.len()));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert("x-chunks-processed", HeaderValue::from(result.chunks_processed));

        Ok((StatusCode::OK, headers, Body::from(result.audio_data)).into_response())
    }

    fn check_text_length(&self, text: &str) -> AppResult<()> {
        if char_len(text) > self.max_text_chars {
            return Err(AppError::PayloadTooLarge(format!(
                "Text must be {} characters or less",
                self.max_text_chars
            )));
        }
        Ok(())
    }
}

async fn read_form(mut multipart: Multipart) -> AppResult<ConvertFileForm> {
    let mut form = ConvertFileForm {
        file: None,
        generate_audio: false,
        is_text_file: false,
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                form.file = Some((file_name, bytes.to_vec()));
            }
            "generateAudio" => form.generate_audio = field.text().await? == "true",
            "isTextFile" => form.is_text_file = field.text().await? == "true",
            _ => {}
        }
    }

    Ok(form)
}
