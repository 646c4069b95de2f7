#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test — panics are the assertion mechanism")]

use bytes::Bytes;
use futures::stream;
use gembridge_core::modules::config::{load_config, save_config};
use gembridge_core::proxy::response::collect_stream_usage;
use gembridge_core::{apply_thinking_config, extract_usage_from_body};
use gembridge_types::{CompatConfig, ThinkingNormalizationMode};
use serde_json::json;

fn openai_style_request() -> serde_json::Value {
    json!({
        "contents": [{"role": "user", "parts": [{"text": "Explain SSE"}]}],
        "reasoning_effort": "medium",
        "generationConfig": {
            "maxOutputTokens": 8192,
            "thinkingConfig": {"thinkingLevel": "extreme", "includeThoughts": true, "thinkingBudget": 2048}
        }
    })
}

fn gemini_sse_body() -> &'static str {
    concat!(
        "data: {\"response\":{\"candidates\":[{\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"thinking...\",\"thought\":true}]}}],",
        "\"usageMetadata\":{\"promptTokenCount\":20,\"totalTokenCount\":20}}}\n\n",
        "data: {\"response\":{\"candidates\":[{\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"Server-sent events\"}]},\"finishReason\":\"STOP\"}],",
        "\"usageMetadata\":{\"promptTokenCount\":20,\"candidatesTokenCount\":15,\"thoughtsTokenCount\":64,\"totalTokenCount\":99}}}\n\n",
    )
}

#[test]
fn test_request_from_mixed_dialects() {
    let mut body = openai_style_request();
    let applied = apply_thinking_config(&mut body, ThinkingNormalizationMode::Normalize)
        .expect("thinking configured");

    // Invalid native level falls back to the top-level effort; the budget is dropped.
    assert_eq!(
        body["generationConfig"]["thinkingConfig"],
        json!({"thinkingLevel": "high", "includeThoughts": true})
    );
    assert_eq!(applied.to_json(), body["generationConfig"]["thinkingConfig"]);
    assert!(body.get("reasoning_effort").is_none());
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
}

#[test]
fn test_passthrough_from_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gembridge.json");
    std::fs::write(&path, r#"{"thinking":{"mode":"passthrough"}}"#).expect("write");
    let config = load_config(&path).expect("load");

    let mut body = openai_style_request();
    assert!(apply_thinking_config(&mut body, config.thinking.mode).is_none());
    assert_eq!(body, openai_style_request());

    save_config(&path, &CompatConfig::default()).expect("save");
    let reloaded = load_config(&path).expect("reload");
    assert_eq!(reloaded.thinking.mode, ThinkingNormalizationMode::Normalize);
}

#[test]
fn test_usage_from_buffered_sse_body() {
    let usage = extract_usage_from_body(
        Some("text/event-stream"),
        gemini_sse_body().as_bytes(),
        &CompatConfig::default().response,
    )
    .expect("ok")
    .expect("usage");
    assert_eq!(usage.total_token_count, 99);
    assert_eq!(usage.output_tokens(), 79);
}

#[tokio::test]
async fn test_usage_from_chunked_stream_matches_buffered() {
    let body = gemini_sse_body().as_bytes();
    let chunks: Vec<Result<Bytes, std::io::Error>> =
        body.chunks(17).map(|c| Ok(Bytes::copy_from_slice(c))).collect();

    let config = CompatConfig::default().response;
    let streamed = collect_stream_usage(stream::iter(chunks), &config).await.expect("ok");
    let buffered = extract_usage_from_body(None, body, &config).expect("ok");
    assert_eq!(streamed, buffered);
    assert_eq!(streamed.map(|u| u.thoughts_token_count), Some(64));
}
