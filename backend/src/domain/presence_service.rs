//! Derivation of the "currently in the room" view.

use std::sync::Arc;

use chrono::Utc;
use shared::PresenceView;
use tracing::debug;

use crate::domain::clock;
use crate::domain::errors::ServiceError;
use crate::storage::PresenceStorage;

/// Service deriving the presence view from the check-in log.
///
/// Stateless: every call re-derives from the store. Any caching comes
/// from the refresh loop's interval, nothing here.
#[derive(Clone)]
pub struct PresenceService {
    storage: Arc<dyn PresenceStorage>,
}

impl PresenceService {
    pub fn new(storage: Arc<dyn PresenceStorage>) -> Self {
        Self { storage }
    }

    /// Derive the presence view for the current calendar day in the
    /// room's timezone. An empty room is a valid view, not an error.
    pub async fn current_view(&self) -> Result<PresenceView, ServiceError> {
        let today = clock::today();

        let children = self
            .storage
            .list_by_day(today)
            .await
            .map_err(ServiceError::StoreUnavailable)?;

        debug!("Presence view for {}: {} children", today, children.len());

        Ok(PresenceView {
            day: today.format("%Y-%m-%d").to_string(),
            generated_at: Utc::now().to_rfc3339(),
            children,
        })
    }
}
