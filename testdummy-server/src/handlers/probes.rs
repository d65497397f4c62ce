//! Probe endpoints: ping, health, status, echo, version and env

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::ffi::OsString;
use testdummy_core::VERSION;
use testdummy_web::LenientQuery;

use crate::state::AppState;

const DEFAULT_STATUS: StatusCode = StatusCode::BAD_REQUEST;

/// Liveness probe, optionally burning CPU first
pub async fn ping(State(state): State<AppState>) -> (StatusCode, &'static str) {
    state.stress.run(state.stress_duration).await;
    (StatusCode::OK, "pong")
}

/// Readiness probe. `?healthy=<bool>` overrides the stored health first.
pub async fn health(State(state): State<AppState>, query: LenientQuery) -> StatusCode {
    if state.health.apply_override(query.get_bool("healthy")) {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Answer with whatever `?status=` asks for
pub async fn status(query: LenientQuery) -> StatusCode {
    query
        .get_i64("status")
        .and_then(|code| u16::try_from(code).ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(DEFAULT_STATUS)
}

pub async fn echo(body: Result<Bytes, BytesRejection>) -> Response {
    match body {
        Ok(bytes) => bytes.into_response(),
        Err(e) => format!("Unable to read body: {}", e).into_response(),
    }
}

pub async fn version() -> &'static str {
    VERSION
}

/// Process environment as sorted `KEY=VALUE` lines
pub async fn env() -> String {
    render_env(std::env::vars_os())
}

fn render_env(vars: impl Iterator<Item = (OsString, OsString)>) -> String {
    let mut lines: Vec<String> = vars
        .map(|(key, value)| format!("{}={}", key.to_string_lossy(), value.to_string_lossy()))
        .collect();
    lines.sort();

    lines.into_iter().fold(String::new(), |mut out, line| {
        out.push_str(&line);
        out.push('\n');
        out
    })
}
