//! Registration and listing of children.

use std::sync::Arc;

use chrono::Utc;
use shared::{Child, ChildListResponse, ChildResponse, RegisterChildRequest};
use tracing::{info, warn};

use crate::domain::errors::ServiceError;
use crate::storage::RosterStorage;

/// Service for managing the roster of registered children
#[derive(Clone)]
pub struct RosterService {
    storage: Arc<dyn RosterStorage>,
}

impl RosterService {
    pub fn new(storage: Arc<dyn RosterStorage>) -> Self {
        Self { storage }
    }

    /// Register a new child.
    ///
    /// Child name and guardian phone are required; guardian name may be
    /// empty. The id is derived from the current timestamp, which is
    /// unique enough for the single-staff-at-a-time registration flow.
    pub async fn register_child(
        &self,
        request: RegisterChildRequest,
    ) -> Result<ChildResponse, ServiceError> {
        info!("Registering child: name={}", request.child_name);

        self.validate_register_request(&request)?;

        let now = Utc::now();
        let child = Child {
            id: Child::generate_id(now.timestamp_millis() as u64),
            name: request.child_name.trim().to_string(),
            guardian_name: request.guardian_name.trim().to_string(),
            guardian_phone: request.guardian_phone.trim().to_string(),
            created_at: now.to_rfc3339(),
        };

        self.storage
            .store_child(&child)
            .await
            .map_err(ServiceError::StoreUnavailable)?;

        info!("Registered child: {} with ID: {}", child.name, child.id);

        Ok(ChildResponse {
            child,
            success_message: "Cadastrado com sucesso!".to_string(),
        })
    }

    /// List all registered children, ordered by name
    pub async fn list_children(&self) -> Result<ChildListResponse, ServiceError> {
        let children = self
            .storage
            .list_children()
            .await
            .map_err(ServiceError::StoreUnavailable)?;

        info!("Found {} registered children", children.len());

        Ok(ChildListResponse { children })
    }

    /// Validate a registration request
    fn validate_register_request(&self, request: &RegisterChildRequest) -> Result<(), ServiceError> {
        if request.child_name.trim().is_empty() || request.guardian_phone.trim().is_empty() {
            warn!("Registration rejected: missing child name or guardian phone");
            return Err(ServiceError::validation("Preencha Nome e WhatsApp."));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DbConnection, RosterRepository};

    async fn service() -> RosterService {
        let db = DbConnection::init_test().await.unwrap();
        RosterService::new(Arc::new(RosterRepository::new(db)))
    }

    fn request(child: &str, guardian: &str, phone: &str) -> RegisterChildRequest {
        RegisterChildRequest {
            child_name: child.to_string(),
            guardian_name: guardian.to_string(),
            guardian_phone: phone.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_list() {
        let service = service().await;

        let response = service
            .register_child(request("Ana", "Maria", "11999990000"))
            .await
            .unwrap();

        assert!(response.child.id.starts_with("child::"));
        // Raw phone stored as given, not normalized.
        assert_eq!(response.child.guardian_phone, "11999990000");

        let listing = service.list_children().await.unwrap();
        assert_eq!(listing.children.len(), 1);
        assert_eq!(listing.children[0].name, "Ana");
    }

    #[tokio::test]
    async fn test_empty_child_name_rejected() {
        let service = service().await;

        let result = service
            .register_child(request("   ", "Maria", "11999990000"))
            .await;

        assert!(matches!(result, Err(ServiceError::ValidationFailed(_))));
        assert!(service.list_children().await.unwrap().children.is_empty());
    }

    #[tokio::test]
    async fn test_empty_phone_rejected() {
        let service = service().await;

        let result = service.register_child(request("Ana", "Maria", "")).await;

        assert!(matches!(result, Err(ServiceError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_guardian_name_may_be_empty() {
        let service = service().await;

        let response = service
            .register_child(request("Ana", "", "11999990000"))
            .await
            .unwrap();

        assert_eq!(response.child.guardian_name, "");
    }
}
