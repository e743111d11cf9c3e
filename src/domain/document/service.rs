use super::error::DocumentError;
use crate::infrastructure::repositories::TextExtractor;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static HORIZONTAL_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\x0C\u{00A0}]+").expect("valid whitespace pattern"));
static SPACE_AROUND_NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ?\n ?").expect("valid newline pattern"));
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid blank line pattern"));
static CONVERTIBLE_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(pdf|txt)$").expect("valid extension pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    /// Text previously extracted on the client, sent back as a `.txt` upload
    PlainText,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
    pub kind: UploadKind,
}

pub struct DocumentService {
    extractor: Arc<dyn TextExtractor>,
}

impl DocumentService {
    pub fn new(extractor: Arc<dyn TextExtractor>) -> Self {
        Self { extractor }
    }

    /// Get the text content of an upload
    ///
    /// Plain text uploads are decoded as UTF-8 and returned as-is.
    /// PDFs are extracted, whitespace-normalized, and must contain some text.
    pub async fn extract_text(&self, upload: UploadedFile) -> Result<String, DocumentError> {
        let file_name = upload.file_name.as_deref().unwrap_or("<unnamed>").to_string();

        match upload.kind {
            UploadKind::PlainText => {
                let text = String::from_utf8_lossy(&upload.bytes).into_owned();
                tracing::info!(file_name = %file_name, text_length = text.len(), "Text upload decoded");
                Ok(text)
            }
            UploadKind::Pdf => {
                let raw = self.extractor.extract(upload.bytes).await.map_err(|e| {
                    tracing::warn!(file_name = %file_name, error = %e, "PDF extraction failed");
                    e
                })?;
                let text = normalize_extracted_text(&raw);

                tracing::info!(
                    file_name = %file_name,
                    raw_length = raw.len(),
                    text_length = text.len(),
                    "PDF text extracted"
                );

                if text.is_empty() {
                    return Err(DocumentError::NoText);
                }

                Ok(text)
            }
        }
    }
}

/// Collapse runs of spaces, drop spaces around line breaks, and keep at most one blank line
pub fn normalize_extracted_text(raw: &str) -> String {
    let collapsed = HORIZONTAL_WHITESPACE.replace_all(raw, " ");
    let lines = SPACE_AROUND_NEWLINE.replace_all(&collapsed, "\n");
    let paragraphs = BLANK_LINES.replace_all(&lines, "\n\n");
    paragraphs.trim().to_string()
}

/// Name of the MP3 offered for download, derived from the uploaded file name
pub fn audio_file_name(upload_name: Option<&str>, now: DateTime<Utc>) -> String {
    let sanitized: String = upload_name
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();

    if sanitized.is_empty() {
        return format!("converted_audio_{}.mp3", now.timestamp_millis());
    }

    if CONVERTIBLE_EXTENSION.is_match(&sanitized) {
        CONVERTIBLE_EXTENSION.replace(&sanitized, ".mp3").into_owned()
    } else {
        format!("{}.mp3", sanitized)
    }
}
