use crate::e2e::helpers;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use helpers::{fake_tts::FakeTts, TestContext, TEST_MAX_TEXT_CHARS};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

const DATA_URL_PREFIX: &str = "data:audio/mp3;base64,";

fn decode_audio_url(audio_url: &str) -> Vec<u8> {
    let encoded = audio_url
        .strip_prefix(DATA_URL_PREFIX)
        .unwrap_or_else(|| panic!("Unexpected audio url: {}", audio_url));
    STANDARD.decode(encoded).unwrap()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_convert_short_text_in_one_request(ctx: &TestContext) {
    let text = "Hello there. General Kenobi.";

    let response = ctx
        .client
        .post("/api/convert", &json!({ "text": text }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    assert_eq!(response.json_field("chunksProcessed"), &json!(1));
    assert_eq!(response.json_field("totalCharacters"), &json!(text.len()));

    let audio = decode_audio_url(response.json_field("audioUrl").as_str().unwrap());
    assert_eq!(audio, format!("[{}]", text).into_bytes());
    assert_eq!(response.json_field("audioSize"), &json!(audio.len()));

    assert_eq!(ctx.tts.calls(), vec![text.to_string()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_join_chunk_audio_in_reading_order(ctx: &TestContext) {
    let text = "First sentence here. Second sentence is here. Third one ends it.";

    let response = ctx
        .client
        .post("/api/convert", &json!({ "text": text }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let expected_chunks = vec![
        "First sentence here.".to_string(),
        "Second sentence is here.".to_string(),
        "Third one ends it.".to_string(),
    ];
    assert_eq!(ctx.tts.calls(), expected_chunks);
    assert_eq!(response.json_field("chunksProcessed"), &json!(3));

    let audio = decode_audio_url(response.json_field("audioUrl").as_str().unwrap());
    assert_eq!(audio, FakeTts::audio_for(&expected_chunks));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_text(ctx: &TestContext) {
    for body in [json!({ "text": "" }), json!({ "text": "   \n\t " }), json!({})] {
        let response = ctx.client.post("/api/convert", &body).await.unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("Text is required");
    }

    assert!(ctx.tts.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_over_the_length_limit(ctx: &TestContext) {
    let text = "a".repeat(TEST_MAX_TEXT_CHARS + 1);

    let response = ctx
        .client
        .post("/api/convert", &json!({ "text": text }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_error_message(&format!(
            "Text must be {} characters or less",
            TEST_MAX_TEXT_CHARS
        ));
    assert!(ctx.tts.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_text_exactly_at_the_length_limit(ctx: &TestContext) {
    let text = "a".repeat(TEST_MAX_TEXT_CHARS);

    let response = ctx
        .client
        .post("/api/convert", &json!({ "text": text }))
        .await
        .unwrap();

    // A single word longer than the chunk limit is sent whole
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json_field("chunksProcessed"), &json!(1));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_when_a_chunk_cannot_be_synthesized(ctx: &TestContext) {
    let text = "This part works. EXPLODE right here. Never reached.";

    let response = ctx
        .client
        .post("/api/convert", &json!({ "text": text }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Text-to-Speech failed");

    // Synthesis stops at the first failing chunk
    assert_eq!(
        ctx.tts.calls(),
        vec!["This part works. EXPLODE right here.".to_string()]
    );
    assert!(response.body.as_ref().unwrap().get("audioUrl").is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_json(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/convert", "application/json", b"{\"text\": ".to_vec())
        .await
        .unwrap();

    assert!(
        response.status.is_client_error(),
        "Expected a client error, got {}",
        response.status
    );
    assert!(ctx.tts.calls().is_empty());
}
