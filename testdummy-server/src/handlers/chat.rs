//! Streaming chat-completion emulation

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use std::convert::Infallible;
use testdummy_core::{ChannelSink, StreamRequest, StreamSession};
use testdummy_web::{LenientQuery, WebError, WebResult};
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tracing::{debug, warn};

/// Frames buffered ahead of the client; one keeps every frame its own write
const FRAME_BUFFER: usize = 1;

pub async fn chat(query: LenientQuery) -> WebResult<Response> {
    let request = StreamRequest::from_params(query.get("tokens"), query.get("sleep"));
    let (mut sink, rx) = ChannelSink::channel(FRAME_BUFFER);

    tokio::spawn(async move {
        let mut session = StreamSession::new();
        match session.emit(&request, &mut sink).await {
            Ok(outcome) => debug!("Stream {} finished: {:?}", session.id(), outcome),
            Err(e) => warn!("Stream {} failed: {}", session.id(), e),
        }
    });

    let body = Body::from_stream(ReceiverStream::new(rx).map(Ok::<_, Infallible>));
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(body)
        .map_err(|e| WebError::internal(e.to_string()))
}
