//! Usage extraction from a live SSE byte stream.

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use gembridge_types::error::ResponseError;
use gembridge_types::{ResponseConfig, UsageMetadata};

use super::sse::{data_payload, usage_from_payload};
use super::{body_text, check_size};
use crate::error::AppResult;

/// Line splitter that carries partial lines across chunk boundaries.
///
/// A pending (newline-free) line longer than `max_line_bytes` is an error,
/// so a stream that never emits `\n` cannot grow the buffer without bound.
#[derive(Debug)]
pub struct UsageTracker {
    buffer: BytesMut,
    /// Bytes of `buffer` already searched for `\n`.
    scanned: usize,
    max_line_bytes: usize,
    usage: Option<UsageMetadata>,
}

impl Default for UsageTracker {
    fn default() -> Self {
        Self::with_limit(ResponseConfig::default().max_body_bytes)
    }
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_line_bytes: usize) -> Self {
        Self { buffer: BytesMut::new(), scanned: 0, max_line_bytes, usage: None }
    }

    /// Feed one chunk; complete lines are scanned immediately.
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), ResponseError> {
        self.buffer.extend_from_slice(chunk);
        while let Some(offset) = self.buffer[self.scanned..].iter().position(|b| *b == b'\n') {
            let line = self.buffer.split_to(self.scanned + offset + 1);
            self.scanned = 0;
            self.scan_line(&line)?;
        }
        self.scanned = self.buffer.len();
        check_size(self.buffer.len(), self.max_line_bytes)
    }

    /// Flush the trailing partial line and return the last usage seen.
    pub fn finish(mut self) -> Result<Option<UsageMetadata>, ResponseError> {
        if !self.buffer.is_empty() {
            let rest = self.buffer.split();
            self.scan_line(&rest)?;
        }
        Ok(self.usage)
    }

    fn scan_line(&mut self, line: &[u8]) -> Result<(), ResponseError> {
        check_size(line.len(), self.max_line_bytes)?;
        if let Some(usage) = data_payload(body_text(line)?).and_then(usage_from_payload) {
            self.usage = Some(usage);
        }
        Ok(())
    }
}

/// Drain an SSE byte stream and return the last usage it reported.
///
/// Lines are capped at `config.max_body_bytes`. When `config.extract_usage`
/// is off the stream is not polled and `Ok(None)` is returned.
pub async fn collect_stream_usage<S, E>(
    mut stream: S,
    config: &ResponseConfig,
) -> AppResult<Option<UsageMetadata>>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    if !config.extract_usage {
        return Ok(None);
    }
    let mut tracker = UsageTracker::with_limit(config.max_body_bytes);
    while let Some(chunk_result) = stream.next().await {
        let chunk =
            chunk_result.map_err(|e| ResponseError::StreamError { message: e.to_string() })?;
        tracker.push(&chunk)?;
    }
    let usage = tracker.finish()?;
    if let Some(u) = &usage {
        tracing::debug!(
            "[Usage] Stream finished: prompt={}, output={}, total={}",
            u.prompt_token_count,
            u.output_tokens(),
            u.total_token_count
        );
    }
    Ok(usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use futures::stream;

    fn chunks(parts: &[&str]) -> Vec<Result<Bytes, String>> {
        parts.iter().map(|p| Ok(Bytes::from(p.to_string()))).collect()
    }

    #[test]
    fn test_tracker_handles_split_lines() {
        let mut tracker = UsageTracker::new();
        tracker.push(b"data: {\"usageMeta").expect("push");
        tracker.push(b"data\":{\"totalTokenCount\":9}}\n\n").expect("push");
        let usage = tracker.finish().expect("finish");
        assert_eq!(usage.map(|u| u.total_token_count), Some(9));
    }

    #[test]
    fn test_tracker_flushes_trailing_line() {
        let mut tracker = UsageTracker::new();
        tracker.push(b"data: {\"usageMetadata\":{\"promptTokenCount\":4}}").expect("push");
        assert_eq!(tracker.finish().expect("finish").map(|u| u.prompt_token_count), Some(4));
    }

    #[test]
    fn test_tracker_keeps_last_usage_across_many_chunks() {
        let mut tracker = UsageTracker::new();
        for n in 1..=50u64 {
            let line = format!("data: {{\"usageMetadata\":{{\"totalTokenCount\":{n}}}}}\n");
            for byte in line.as_bytes() {
                tracker.push(std::slice::from_ref(byte)).expect("push");
            }
        }
        assert_eq!(tracker.finish().expect("finish").map(|u| u.total_token_count), Some(50));
    }

    #[test]
    fn test_tracker_rejects_line_without_newline_over_limit() {
        let mut tracker = UsageTracker::with_limit(16);
        tracker.push(b"data: 0123456").expect("under limit");
        let err = tracker.push(b"789abcdef").expect_err("over limit");
        assert_eq!(err, ResponseError::BodyTooLarge { size: 22, limit: 16 });
    }

    #[test]
    fn test_tracker_limit_applies_per_line() {
        let mut tracker = UsageTracker::with_limit(16);
        for _ in 0..10 {
            tracker.push(b"data: [DONE]\n\n").expect("short lines");
        }
        assert_eq!(tracker.finish().expect("finish"), None);
    }

    #[test]
    fn test_tracker_rejects_invalid_utf8_line() {
        let mut tracker = UsageTracker::new();
        let err = tracker.push(&[b'd', b'a', b't', b'a', b':', 0xc3, b'\n']).expect_err("utf8");
        assert!(matches!(err, ResponseError::InvalidUtf8 { .. }));
    }

    #[tokio::test]
    async fn test_collect_across_chunks() {
        let s = stream::iter(chunks(&[
            "data: {\"usageMetadata\":{\"promptTokenCount\":3,",
            "\"totalTokenCount\":3}}\n\ndata: {\"usageMetadata\":",
            "{\"promptTokenCount\":3,\"candidatesTokenCount\":8,\"totalTokenCount\":11}}\r\n\r\n",
            "data: [DONE]\n\n",
        ]));
        let usage = collect_stream_usage(s, &ResponseConfig::default())
            .await
            .expect("ok")
            .expect("usage");
        assert_eq!(usage.candidates_token_count, 8);
        assert_eq!(usage.total_token_count, 11);
    }

    #[tokio::test]
    async fn test_collect_stream_error() {
        let s = stream::iter(vec![
            Ok(Bytes::from_static(b"data: {}\n")),
            Err("connection reset".to_string()),
        ]);
        let err = collect_stream_usage(s, &ResponseConfig::default())
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_collect_empty_stream() {
        let s = stream::iter(chunks(&[]));
        assert_eq!(collect_stream_usage(s, &ResponseConfig::default()).await.expect("ok"), None);
    }

    #[tokio::test]
    async fn test_collect_honors_max_body_bytes() {
        let config = ResponseConfig { max_body_bytes: 32, ..ResponseConfig::default() };
        let s = stream::iter(chunks(&["data: ", &"x".repeat(20), &"y".repeat(20)]));
        let err = collect_stream_usage(s, &config).await.expect_err("too large");
        assert!(matches!(
            err,
            AppError::Response(ResponseError::BodyTooLarge { size: 46, limit: 32 })
        ));
    }

    #[tokio::test]
    async fn test_collect_disabled_returns_none() {
        let config = ResponseConfig { extract_usage: false, ..ResponseConfig::default() };
        let s = stream::iter(chunks(&["data: {\"usageMetadata\":{\"totalTokenCount\":5}}\n"]));
        assert_eq!(collect_stream_usage(s, &config).await.expect("ok"), None);
    }
}
