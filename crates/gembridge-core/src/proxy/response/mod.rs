//! Usage telemetry from upstream response bodies.
//!
//! Gemini reports token counts in `usageMetadata`, either on a plain JSON
//! body, on each `data:` event of an SSE stream, or wrapped in the
//! `v1internal` `response` envelope.

pub mod sse;
pub mod stream;

use gembridge_types::error::ResponseError;
use gembridge_types::{ResponseConfig, UsageMetadata};
use serde_json::Value;

use crate::error::AppResult;

pub use sse::scan_sse_usage;
pub use stream::collect_stream_usage;

/// Reject bodies above `limit`.
pub(crate) fn check_size(size: usize, limit: usize) -> Result<(), ResponseError> {
    if size > limit {
        return Err(ResponseError::BodyTooLarge { size, limit });
    }
    Ok(())
}

/// Body as UTF-8. Invalid UTF-8 is rejected on every path (JSON, buffered
/// SSE, streamed SSE) rather than replaced.
pub(crate) fn body_text(bytes: &[u8]) -> Result<&str, ResponseError> {
    std::str::from_utf8(bytes).map_err(|e| ResponseError::InvalidUtf8 { message: e.to_string() })
}

/// Parse a response body as JSON, refusing bodies above `max_bytes`.
pub fn parse_json_body(bytes: &[u8], max_bytes: usize) -> AppResult<Value> {
    check_size(bytes.len(), max_bytes)?;
    let text = body_text(bytes)?;
    let json = serde_json::from_str::<Value>(text)
        .map_err(|e| ResponseError::InvalidJson { message: e.to_string() })?;
    Ok(json)
}

/// Token counts from a `usageMetadata` object. Missing or non-integer
/// counts read as 0; a non-object yields `None`.
pub fn usage_from_metadata(u: &Value) -> Option<UsageMetadata> {
    u.as_object()?;
    let count = |key: &str| u.get(key).and_then(Value::as_u64).unwrap_or(0);
    Some(UsageMetadata {
        prompt_token_count: count("promptTokenCount"),
        candidates_token_count: count("candidatesTokenCount"),
        total_token_count: count("totalTokenCount"),
        cached_content_token_count: count("cachedContentTokenCount"),
        thoughts_token_count: count("thoughtsTokenCount"),
    })
}

/// Usage from a parsed response.
///
/// Arrays (non-streaming `streamGenerateContent`) use the last element that
/// carries usage.
pub fn extract_usage(json: &Value) -> Option<UsageMetadata> {
    if let Some(items) = json.as_array() {
        return items.iter().rev().find_map(extract_usage);
    }
    json.get("response")
        .and_then(|inner| inner.get("usageMetadata"))
        .or_else(|| json.get("usageMetadata"))
        .and_then(usage_from_metadata)
}

/// Whether a body should be scanned as SSE rather than parsed as JSON.
pub fn is_event_stream(content_type: Option<&str>, bytes: &[u8]) -> bool {
    if let Some(ct) = content_type {
        if ct.to_ascii_lowercase().contains("text/event-stream") {
            return true;
        }
    }
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    bytes[start..].starts_with(b"data:")
}

/// Usage from a complete response body, SSE or JSON.
///
/// `Ok(None)` when extraction is disabled or the body carries no usage.
pub fn extract_usage_from_body(
    content_type: Option<&str>,
    bytes: &[u8],
    config: &ResponseConfig,
) -> AppResult<Option<UsageMetadata>> {
    if !config.extract_usage {
        return Ok(None);
    }
    if is_event_stream(content_type, bytes) {
        check_size(bytes.len(), config.max_body_bytes)?;
        return Ok(scan_sse_usage(body_text(bytes)?));
    }
    let json = parse_json_body(bytes, config.max_body_bytes)?;
    let usage = extract_usage(&json);
    if usage.is_none() {
        tracing::debug!("[Usage] No usageMetadata in JSON response");
    }
    Ok(usage)
}
