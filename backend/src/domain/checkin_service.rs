//! The check-in flow and per-child room actions.
//!
//! Flow for one confirmed arrival: resolve the selected child, append
//! a snapshot check-in event, then dispatch the arrival notification.
//! Persistence success gates notification — a failed write terminates
//! the flow and nothing is sent. The reverse never holds: a rejected
//! or unreachable gateway does not undo the committed record.

use std::sync::Arc;

use shared::{CheckIn, CheckInRequest, CheckInResponse, MessageKind, RoomActionResponse};
use tracing::{info, warn};

use crate::domain::clock;
use crate::domain::errors::ServiceError;
use crate::domain::notification::NotificationDispatcher;
use crate::storage::{PresenceStorage, RosterStorage};

/// Service for recording arrivals and notifying guardians
#[derive(Clone)]
pub struct CheckInService {
    roster: Arc<dyn RosterStorage>,
    presence: Arc<dyn PresenceStorage>,
    dispatcher: NotificationDispatcher,
}

impl CheckInService {
    pub fn new(
        roster: Arc<dyn RosterStorage>,
        presence: Arc<dyn PresenceStorage>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            roster,
            presence,
            dispatcher,
        }
    }

    /// Record a confirmed arrival and notify the guardian.
    ///
    /// Duplicate check-ins for the same child on the same day are
    /// permitted: each confirm appends another event and sends another
    /// arrival message.
    pub async fn check_in(&self, request: CheckInRequest) -> Result<CheckInResponse, ServiceError> {
        if request.child_id.trim().is_empty() {
            return Err(ServiceError::validation("Nenhuma criança selecionada."));
        }

        let child = self
            .roster
            .get_child(&request.child_id)
            .await
            .map_err(ServiceError::StoreUnavailable)?
            .ok_or_else(|| {
                warn!("Check-in for unknown child: {}", request.child_id);
                ServiceError::validation(format!("Criança não encontrada: {}", request.child_id))
            })?;

        let checkin = CheckIn {
            id: CheckIn::generate_id(),
            child_id: child.id.clone(),
            child_name: child.name.clone(),
            guardian_name: child.guardian_name.clone(),
            guardian_phone: child.guardian_phone.clone(),
            entry_timestamp: clock::now_entry_timestamp(),
        };

        self.presence
            .store_checkin(&checkin)
            .await
            .map_err(ServiceError::StoreUnavailable)?;

        info!(
            "Check-in recorded for {} at {}",
            checkin.child_name, checkin.entry_timestamp
        );

        // The record is committed; the delivery outcome is reported,
        // never rolled back or retried.
        let delivery = self
            .dispatcher
            .send(
                &checkin.guardian_phone,
                MessageKind::Arrival,
                &checkin.child_name,
                &checkin.guardian_name,
            )
            .await;

        Ok(CheckInResponse { checkin, delivery })
    }

    /// Dispatch a room-action notification (bathroom, distress, urgent
    /// call) for a child currently present today.
    ///
    /// No persistence and no state transition: purely a notification
    /// side effect, independently repeatable with no cooldown.
    pub async fn notify_guardian(
        &self,
        checkin_id: &str,
        kind: MessageKind,
    ) -> Result<RoomActionResponse, ServiceError> {
        let today = clock::today();
        let present = self
            .presence
            .list_by_day(today)
            .await
            .map_err(ServiceError::StoreUnavailable)?;

        let row = present
            .into_iter()
            .find(|c| c.id == checkin_id)
            .ok_or_else(|| {
                ServiceError::validation(format!("Criança não está em sala: {}", checkin_id))
            })?;

        let delivery = self
            .dispatcher
            .send(&row.guardian_phone, kind, &row.child_name, &row.guardian_name)
            .await;

        Ok(RoomActionResponse { delivery })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::GatewayConfig;
    use crate::storage::{DbConnection, PresenceRepository, RosterRepository};
    use chrono::Utc;
    use shared::{Child, DeliveryOutcome};
    use std::time::Duration;

    /// A dispatcher pointed at a port that refuses connections: every
    /// send comes back `Failed`, which is enough for flow tests.
    async fn dead_dispatcher() -> NotificationDispatcher {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        NotificationDispatcher::new(GatewayConfig {
            base_url: format!("http://{}", addr),
            instance: "kids_room".to_string(),
            api_key: "secret".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    async fn setup() -> (CheckInService, Arc<RosterRepository>, Arc<PresenceRepository>) {
        let db = DbConnection::init_test().await.unwrap();
        let roster = Arc::new(RosterRepository::new(db.clone()));
        let presence = Arc::new(PresenceRepository::new(db));
        let service = CheckInService::new(roster.clone(), presence.clone(), dead_dispatcher().await);
        (service, roster, presence)
    }

    async fn register(roster: &RosterRepository, id: &str, name: &str) -> Child {
        let child = Child {
            id: id.to_string(),
            name: name.to_string(),
            guardian_name: "Maria".to_string(),
            guardian_phone: "11999990000".to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        roster.store_child(&child).await.unwrap();
        child
    }

    #[tokio::test]
    async fn test_checkin_records_snapshot_even_when_gateway_is_down() {
        let (service, roster, presence) = setup().await;
        register(&roster, "child::1", "Ana").await;

        let response = service
            .check_in(CheckInRequest {
                child_id: "child::1".to_string(),
            })
            .await
            .unwrap();

        // Record committed, delivery failed — and that is fine.
        assert!(matches!(response.delivery, DeliveryOutcome::Failed { .. }));
        assert_eq!(response.checkin.child_name, "Ana");
        assert_eq!(response.checkin.guardian_phone, "11999990000");

        let present = presence.list_by_day(clock::today()).await.unwrap();
        assert_eq!(present.len(), 1);
        assert_eq!(present[0].id, response.checkin.id);
    }

    #[tokio::test]
    async fn test_empty_selection_rejected_without_write() {
        let (service, _roster, presence) = setup().await;

        let result = service
            .check_in(CheckInRequest {
                child_id: "".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ServiceError::ValidationFailed(_))));
        assert!(presence.list_by_day(clock::today()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_child_rejected() {
        let (service, _roster, _presence) = setup().await;

        let result = service
            .check_in(CheckInRequest {
                child_id: "child::999".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ServiceError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_duplicate_checkins_both_recorded() {
        let (service, roster, presence) = setup().await;
        register(&roster, "child::1", "Ana").await;

        let first = service
            .check_in(CheckInRequest {
                child_id: "child::1".to_string(),
            })
            .await
            .unwrap();
        let second = service
            .check_in(CheckInRequest {
                child_id: "child::1".to_string(),
            })
            .await
            .unwrap();

        assert_ne!(first.checkin.id, second.checkin.id);
        let present = presence.list_by_day(clock::today()).await.unwrap();
        assert_eq!(present.len(), 2);
    }

    #[tokio::test]
    async fn test_room_action_requires_present_child() {
        let (service, _roster, _presence) = setup().await;

        let result = service
            .notify_guardian("checkin::42", MessageKind::Bathroom)
            .await;

        assert!(matches!(result, Err(ServiceError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_room_action_targets_row_contact() {
        let (service, roster, _presence) = setup().await;
        register(&roster, "child::1", "Ana").await;

        let checked_in = service
            .check_in(CheckInRequest {
                child_id: "child::1".to_string(),
            })
            .await
            .unwrap();

        let response = service
            .notify_guardian(&checked_in.checkin.id, MessageKind::UrgentCall)
            .await
            .unwrap();

        // Gateway is down in this fixture; the dispatch was attempted.
        assert!(matches!(response.delivery, DeliveryOutcome::Failed { .. }));
    }
}
