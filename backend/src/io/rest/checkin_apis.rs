//! # REST API for Check-ins
//!
//! Confirming an arrival. The response carries both the committed
//! check-in and the arrival notification outcome; a failed delivery is
//! still a 201, because the record stands either way.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::error_response;
use crate::AppState;
use shared::CheckInRequest;

/// Record a confirmed arrival and notify the guardian
pub async fn create_checkin(
    State(state): State<AppState>,
    Json(request): Json<CheckInRequest>,
) -> impl IntoResponse {
    info!("POST /api/checkins - child: {}", request.child_id);

    match state.checkin_service.check_in(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to record check-in: {}", e);
            error_response(e)
        }
    }
}
