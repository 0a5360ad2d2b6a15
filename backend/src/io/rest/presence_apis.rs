//! # REST API for the Presence View and Room Actions
//!
//! `GET /api/presence` serves the view last published by the refresh
//! loop, so every viewer sees the same snapshot and staleness is
//! bounded by the refresh interval. The room-action route dispatches a
//! guardian notification for one present child.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::error_response;
use crate::AppState;
use shared::RoomActionRequest;

/// Get the latest published presence view
pub async fn get_presence(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/presence");

    let view = state.presence_rx.borrow().clone();
    (StatusCode::OK, Json(view)).into_response()
}

/// Send a room-action notification for a present child
pub async fn notify_guardian(
    State(state): State<AppState>,
    Path(checkin_id): Path<String>,
    Json(request): Json<RoomActionRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/presence/{}/notify - kind: {}",
        checkin_id, request.kind
    );

    match state
        .checkin_service
        .notify_guardian(&checkin_id, request.kind)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to dispatch room action: {}", e);
            error_response(e)
        }
    }
}
