//! Locating `data:` lines in SSE text.

use gembridge_types::UsageMetadata;
use serde_json::Value;

use super::extract_usage;

/// Parse a single SSE line into (key, value) pair.
///
/// SSE format: `key: value\n`. At most one space after the colon is part
/// of the separator.
pub fn parse_sse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let colon_pos = line.find(':')?;
    let key = &line[..colon_pos];
    let value = &line[colon_pos + 1..];
    Some((key, value.strip_prefix(' ').unwrap_or(value)))
}

/// Payload of a `data:` line, skipping empty payloads and the `[DONE]` marker.
pub fn data_payload(line: &str) -> Option<&str> {
    let (key, value) = parse_sse_line(line)?;
    if key != "data" {
        return None;
    }
    let payload = value.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return None;
    }
    Some(payload)
}

/// All `data:` payloads in `text`, in order.
pub fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter_map(data_payload)
}

/// Usage carried by one `data:` payload, if it parses.
pub(crate) fn usage_from_payload(payload: &str) -> Option<UsageMetadata> {
    if !payload.contains("usageMetadata") {
        return None;
    }
    match serde_json::from_str::<Value>(payload) {
        Ok(json) => extract_usage(&json),
        Err(e) => {
            tracing::trace!("[Usage] Skipping unparsable SSE payload: {}", e);
            None
        },
    }
}

/// Usage from SSE text. Later events report cumulative counts, so the last
/// one wins.
pub fn scan_sse_usage(text: &str) -> Option<UsageMetadata> {
    data_lines(text).filter_map(usage_from_payload).last()
}
