//! # Kids Room Backend
//!
//! Presence tracking and guardian notification for a supervised kids
//! room. The backend is layered the usual way:
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, dispatcher, session gate)
//!     ↓
//! Storage Layer (SQLite, append-only stores)
//! ```
//!
//! plus a periodic refresh task that republishes the derived presence
//! view so every connected viewer converges on the same state.

pub mod config;
pub mod domain;
pub mod io;
pub mod refresh;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use shared::PresenceView;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    CheckInService, NotificationDispatcher, PresenceService, RosterService, SessionService,
};
use crate::refresh::spawn_refresh_loop;
use crate::storage::{DbConnection, PresenceRepository, RosterRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub roster_service: RosterService,
    pub checkin_service: CheckInService,
    pub session_service: SessionService,
    /// Latest presence view published by the refresh loop
    pub presence_rx: watch::Receiver<PresenceView>,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;

    let roster = Arc::new(RosterRepository::new(db.clone()));
    let presence = Arc::new(PresenceRepository::new(db));

    info!("Setting up domain services");
    let dispatcher = NotificationDispatcher::new(config.gateway.clone())?;
    let roster_service = RosterService::new(roster.clone());
    let presence_service = PresenceService::new(presence.clone());
    let checkin_service = CheckInService::new(roster, presence, dispatcher);
    let session_service = SessionService::new(config.app_password.clone());

    info!(
        "Starting presence refresh loop ({}s interval)",
        config.refresh_interval.as_secs()
    );
    let presence_rx = spawn_refresh_loop(presence_service, config.refresh_interval);

    Ok(AppState {
        roster_service,
        checkin_service,
        session_service,
        presence_rx,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the staff frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    // Everything except the session gate requires an authenticated
    // session.
    let protected_routes = Router::new()
        .route(
            "/children",
            get(io::rest::list_children).post(io::rest::register_child),
        )
        .route("/checkins", post(io::rest::create_checkin))
        .route("/presence", get(io::rest::get_presence))
        .route(
            "/presence/:checkin_id/notify",
            post(io::rest::notify_guardian),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    let session_routes = Router::new()
        .route("/session", post(io::rest::start_session))
        .route("/session/login", post(io::rest::login));

    Router::new()
        .nest("/api", protected_routes.merge(session_routes))
        .layer(cors)
        .with_state(app_state)
}

/// Reject requests whose `X-Session-Id` has not passed the password
/// gate.
async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let session_id = request
        .headers()
        .get("x-session-id")
        .and_then(|v| v.to_str().ok());

    match session_id {
        Some(id) if state.session_service.is_authenticated(id) => next.run(request).await,
        _ => (StatusCode::UNAUTHORIZED, "Sessão não autenticada.").into_response(),
    }
}
