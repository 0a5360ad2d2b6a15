//! Shared-password session gate.
//!
//! Every connected viewer gets its own session with an explicit
//! lifecycle: created unauthenticated, flipped to authenticated only
//! on an exact match against the configured room password, never
//! mutable from outside this service. Sessions are in-process state;
//! cross-session coordination happens only through the stores.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use shared::{SessionLoginResponse, StartSessionResponse};
use tracing::{info, warn};

#[derive(Debug, Clone)]
struct Session {
    authenticated: bool,
}

/// Service managing per-viewer sessions and the shared password gate
#[derive(Clone)]
pub struct SessionService {
    password: String,
    /// Sessions are never expired or evicted; the map holds one entry
    /// per opened session for the life of the process. The expected
    /// population is a handful of staff devices per service.
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionService {
    pub fn new(password: String) -> Self {
        Self {
            password,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Open a new, unauthenticated session.
    pub fn start_session(&self) -> StartSessionResponse {
        let session_id = uuid::Uuid::new_v4().to_string();

        self.sessions
            .write()
            .expect("session map lock poisoned")
            .insert(session_id.clone(), Session { authenticated: false });

        StartSessionResponse { session_id }
    }

    /// Attempt to authenticate a session with the shared password.
    ///
    /// A wrong password leaves the session unauthenticated; there is no
    /// lockout or attempt limit.
    pub fn login(&self, session_id: &str, password: &str) -> SessionLoginResponse {
        let mut sessions = self.sessions.write().expect("session map lock poisoned");

        let Some(session) = sessions.get_mut(session_id) else {
            warn!("Login attempt for unknown session");
            return SessionLoginResponse {
                success: false,
                message: "Sessão desconhecida.".to_string(),
            };
        };

        if password == self.password {
            session.authenticated = true;
            info!("Session authenticated");
            SessionLoginResponse {
                success: true,
                message: "Acesso liberado.".to_string(),
            }
        } else {
            warn!("Wrong room password");
            SessionLoginResponse {
                success: false,
                message: "Senha incorreta! 🚫".to_string(),
            }
        }
    }

    /// Whether a session exists and has passed the password gate.
    pub fn is_authenticated(&self, session_id: &str) -> bool {
        self.sessions
            .read()
            .expect("session map lock poisoned")
            .get(session_id)
            .map(|s| s.authenticated)
            .unwrap_or(false)
    }
}
