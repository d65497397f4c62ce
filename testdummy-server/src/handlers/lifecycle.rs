//! Process lifecycle and dependency endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use testdummy_core::DEFAULT_EXIT_CODE;
use testdummy_web::LenientQuery;

use crate::state::AppState;

/// Write the termination log and exit with `?code=`. Never responds.
pub async fn exit(State(state): State<AppState>, query: LenientQuery) -> StatusCode {
    let code = query
        .get_i64("code")
        .and_then(|code| i32::try_from(code).ok())
        .unwrap_or(DEFAULT_EXIT_CODE);
    state.termination.trigger(code)
}

/// Aggregated dependency report
pub async fn healthcheck(State(state): State<AppState>) -> Response {
    let report = state.checker.run().await;
    let status = StatusCode::from_u16(report.status.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(report)).into_response()
}
