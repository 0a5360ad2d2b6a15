//! # REST API for Session Management
//!
//! Opening a session and passing the shared-password gate. These are
//! the only routes reachable without an authenticated session.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::AppState;
use shared::SessionLoginRequest;

/// Open a new, unauthenticated session
pub async fn start_session(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/session");

    let response = state.session_service.start_session();
    (StatusCode::CREATED, Json(response)).into_response()
}

/// Authenticate a session with the shared room password
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<SessionLoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/session/login");

    let response = state
        .session_service
        .login(&request.session_id, &request.password);

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(response)).into_response()
}
