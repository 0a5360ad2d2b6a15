//! # REST API for the Roster
//!
//! Registering children and listing them for the check-in selection.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::error_response;
use crate::AppState;
use shared::RegisterChildRequest;

/// Register a new child
pub async fn register_child(
    State(state): State<AppState>,
    Json(request): Json<RegisterChildRequest>,
) -> impl IntoResponse {
    info!("POST /api/children - child: {}", request.child_name);

    match state.roster_service.register_child(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to register child: {}", e);
            error_response(e)
        }
    }
}

/// List all registered children, ordered by name
pub async fn list_children(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/children");

    match state.roster_service.list_children().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list children: {}", e);
            error_response(e)
        }
    }
}
