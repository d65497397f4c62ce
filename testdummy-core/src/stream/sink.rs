//! Output channels for streamed frames

use crate::error::SinkError;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Destination for frames, each delivered as its own flushed write
#[async_trait]
pub trait FrameSink: Send + Sync {
    /// Whether frames reach the client as they are sent rather than buffered
    fn supports_streaming(&self) -> bool;

    async fn send(&mut self, frame: String) -> Result<(), SinkError>;

    /// Resolves once the receiving side is gone. Never resolves by default.
    async fn closed(&self) {
        std::future::pending::<()>().await
    }
}

/// Sink feeding a bounded channel, drained by a streaming response body
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }

    /// Create a sink and the receiver draining it
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl FrameSink for ChannelSink {
    fn supports_streaming(&self) -> bool {
        true
    }

    async fn send(&mut self, frame: String) -> Result<(), SinkError> {
        self.tx.send(frame).await.map_err(|_| SinkError::Closed)
    }

    async fn closed(&self) {
        self.tx.closed().await
    }
}
