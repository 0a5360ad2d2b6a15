//! Periodic presence republisher.
//!
//! A fixed-interval task re-issues the presence query and publishes the
//! derived view through a watch channel. Viewers read the latest
//! published snapshot, so everyone converges on the same state with
//! staleness bounded by the interval. Deliberately decoupled from the
//! write paths: a check-in does not trigger a republish.

use std::time::Duration;

use chrono::Utc;
use shared::PresenceView;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::clock;
use crate::domain::PresenceService;

/// Spawn the refresh task and hand out the receiving side of the view.
///
/// The initial published value is an empty room; the first tick fires
/// immediately and replaces it with the real derivation. A store error
/// on a tick is logged and the previously published view stays up —
/// recoverable, never fatal.
pub fn spawn_refresh_loop(
    presence_service: PresenceService,
    interval: Duration,
) -> watch::Receiver<PresenceView> {
    let (tx, rx) = watch::channel(empty_view());

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);

        loop {
            ticker.tick().await;

            match presence_service.current_view().await {
                Ok(view) => {
                    debug!("Republished presence view: {} children", view.children.len());
                    if tx.send(view).is_err() {
                        // All receivers dropped; nobody is watching.
                        break;
                    }
                }
                Err(e) => {
                    warn!("Presence refresh failed, keeping last view: {}", e);
                }
            }
        }
    });

    rx
}

fn empty_view() -> PresenceView {
    PresenceView {
        day: clock::today().format("%Y-%m-%d").to_string(),
        generated_at: Utc::now().to_rfc3339(),
        children: Vec::new(),
    }
}
