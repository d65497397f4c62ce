//! Per-request stream sessions

use super::frame::{ChatChunk, DONE_FRAME, VOCABULARY};
use super::sink::FrameSink;
use crate::error::StreamError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_TOKENS: usize = 10;
pub const DEFAULT_SLEEP: Duration = Duration::from_millis(5);

/// Caller controls for one stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamRequest {
    /// Number of token chunks before the finish chunk
    pub tokens: usize,
    /// Pause between consecutive token chunks
    pub sleep: Duration,
}

impl Default for StreamRequest {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_TOKENS,
            sleep: DEFAULT_SLEEP,
        }
    }
}

impl StreamRequest {
    /// Build from raw query values. Missing, malformed or negative values
    /// fall back to the defaults.
    pub fn from_params(tokens: Option<&str>, sleep_ms: Option<&str>) -> Self {
        let tokens = tokens
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_TOKENS);
        let sleep = sleep_ms
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(|ms| u64::try_from(ms).ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SLEEP);

        Self { tokens, sleep }
    }

    /// Upper bound on frames a session writes for this request
    pub fn frame_count(&self) -> usize {
        self.tokens + 2
    }
}

/// How an emission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitOutcome {
    /// Every frame including the sentinel was written
    Completed { frames: usize },
    /// The sink failed or closed; remaining frames were dropped
    Aborted { frames_sent: usize },
}

/// One streaming response in progress
pub struct StreamSession {
    id: String,
    rng: StdRng,
}

impl StreamSession {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Session with a deterministic token sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            id: format!("chatcmpl-{}", chrono::Utc::now().timestamp()),
            rng,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn next_token(&mut self) -> &'static str {
        VOCABULARY[self.rng.random_range(0..VOCABULARY.len())]
    }

    /// Write every frame for `request` to `sink`.
    ///
    /// Fails without writing when the sink cannot stream. A failing write
    /// ends the emission quietly with [`EmitOutcome::Aborted`].
    pub async fn emit<S>(
        &mut self,
        request: &StreamRequest,
        sink: &mut S,
    ) -> Result<EmitOutcome, StreamError>
    where
        S: FrameSink + ?Sized,
    {
        if !sink.supports_streaming() {
            return Err(StreamError::StreamingUnsupported);
        }

        debug!(
            "Streaming {} tokens for {} with {:?} between chunks",
            request.tokens, self.id, request.sleep
        );

        let mut sent = 0;
        for index in 0..request.tokens {
            let token = self.next_token();
            let frame = ChatChunk::token(&self.id, token).to_frame()?;
            if let Err(e) = sink.send(frame).await {
                warn!("Error writing to stream: {}", e);
                return Ok(EmitOutcome::Aborted { frames_sent: sent });
            }
            sent += 1;

            if index + 1 < request.tokens && !request.sleep.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(request.sleep) => {}
                    _ = sink.closed() => {
                        debug!("Client of {} went away between chunks", self.id);
                        return Ok(EmitOutcome::Aborted { frames_sent: sent });
                    }
                }
            }
        }

        let finish = ChatChunk::finish(&self.id).to_frame()?;
        for (label, frame) in [("final chunk", finish), ("completion", DONE_FRAME.to_string())] {
            if let Err(e) = sink.send(frame).await {
                warn!("Error writing {} to stream: {}", label, e);
                return Ok(EmitOutcome::Aborted { frames_sent: sent });
            }
            sent += 1;
        }

        Ok(EmitOutcome::Completed { frames: sent })
    }
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StreamSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSession").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::stream::frame::FINISH_REASON_STOP;
    use crate::stream::sink::ChannelSink;
    use async_trait::async_trait;
    use tokio::time::Instant;

    #[derive(Default)]
    struct VecSink {
        frames: Vec<String>,
        fail_after: Option<usize>,
    }

    #[async_trait]
    impl FrameSink for VecSink {
        fn supports_streaming(&self) -> bool {
            true
        }

        async fn send(&mut self, frame: String) -> Result<(), SinkError> {
            if self.fail_after == Some(self.frames.len()) {
                return Err(SinkError::Closed);
            }
            self.frames.push(frame);
            Ok(())
        }
    }

    struct BufferedSink;

    #[async_trait]
    impl FrameSink for BufferedSink {
        fn supports_streaming(&self) -> bool {
            false
        }

        async fn send(&mut self, _frame: String) -> Result<(), SinkError> {
            panic!("buffered sink must never receive frames");
        }
    }

    fn request(tokens: usize, sleep_ms: u64) -> StreamRequest {
        StreamRequest {
            tokens,
            sleep: Duration::from_millis(sleep_ms),
        }
    }

    #[tokio::test]
    async fn test_emits_tokens_finish_and_sentinel() {
        let mut sink = VecSink::default();
        let mut session = StreamSession::with_seed(7);
        let outcome = session.emit(&request(3, 0), &mut sink).await.unwrap();

        assert_eq!(outcome, EmitOutcome::Completed { frames: 5 });
        assert_eq!(sink.frames.len(), 5);

        for frame in &sink.frames[..3] {
            let chunk = ChatChunk::from_frame(frame).unwrap();
            assert_eq!(chunk.id, session.id());
            let choice = &chunk.choices[0];
            let content = choice.delta.content.as_deref().unwrap();
            assert!(VOCABULARY.contains(&content));
            assert!(choice.finish_reason.is_none());
        }

        let finish = ChatChunk::from_frame(&sink.frames[3]).unwrap();
        assert!(finish.choices[0].delta.content.is_none());
        assert_eq!(finish.choices[0].finish_reason.as_deref(), Some(FINISH_REASON_STOP));
        assert_eq!(sink.frames[4], DONE_FRAME);
    }

    #[tokio::test]
    async fn test_zero_tokens_still_finishes() {
        let mut sink = VecSink::default();
        let outcome = StreamSession::new()
            .emit(&request(0, 5), &mut sink)
            .await
            .unwrap();

        assert_eq!(outcome, EmitOutcome::Completed { frames: 2 });
        assert!(ChatChunk::from_frame(&sink.frames[0]).is_some());
        assert_eq!(sink.frames[1], DONE_FRAME);
    }

    #[tokio::test]
    async fn test_buffered_sink_is_rejected() {
        let result = StreamSession::new()
            .emit(&StreamRequest::default(), &mut BufferedSink)
            .await;
        assert!(matches!(result, Err(StreamError::StreamingUnsupported)));
    }

    #[tokio::test]
    async fn test_sink_failure_aborts_quietly() {
        let mut sink = VecSink {
            fail_after: Some(2),
            ..Default::default()
        };
        let outcome = StreamSession::new()
            .emit(&request(5, 0), &mut sink)
            .await
            .unwrap();

        assert_eq!(outcome, EmitOutcome::Aborted { frames_sent: 2 });
        assert_eq!(sink.frames.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleeps_only_between_token_chunks() {
        let mut sink = VecSink::default();
        let start = Instant::now();
        StreamSession::new()
            .emit(&request(4, 10), &mut sink)
            .await
            .unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(30));
        assert!(elapsed < Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_disconnect_during_sleep_ends_emission() {
        let (mut sink, mut rx) = ChannelSink::channel(4);
        let task = tokio::spawn(async move {
            StreamSession::new()
                .emit(&request(3, 3_600_000), &mut sink)
                .await
        });

        assert!(rx.recv().await.is_some());
        drop(rx);

        let outcome = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(outcome, EmitOutcome::Aborted { frames_sent: 1 });
    }

    #[tokio::test]
    async fn test_seeded_sessions_repeat_tokens() {
        let mut first = VecSink::default();
        let mut second = VecSink::default();
        StreamSession::with_seed(42).emit(&request(8, 0), &mut first).await.unwrap();
        StreamSession::with_seed(42).emit(&request(8, 0), &mut second).await.unwrap();

        let contents = |sink: &VecSink| -> Vec<Option<String>> {
            sink.frames[..8]
                .iter()
                .map(|f| ChatChunk::from_frame(f).unwrap().choices[0].delta.content.clone())
                .collect()
        };
        assert_eq!(contents(&first), contents(&second));
    }

    #[test]
    fn test_request_params_fall_back_to_defaults() {
        assert_eq!(StreamRequest::from_params(None, None), StreamRequest::default());
        assert_eq!(
            StreamRequest::from_params(Some("3"), Some("0")),
            request(3, 0)
        );
        assert_eq!(StreamRequest::from_params(Some("0"), None).tokens, 0);
        assert_eq!(StreamRequest::from_params(Some("-4"), Some("-1")), StreamRequest::default());
        assert_eq!(StreamRequest::from_params(Some("lots"), Some("1.5")), StreamRequest::default());
        assert_eq!(StreamRequest::default().frame_count(), 12);
    }
}
