//! # Notification Dispatcher
//!
//! Delivers one message to a guardian's phone through the external
//! messaging gateway (Evolution API shape): a single HTTPS POST with a
//! bounded timeout, no retry, no backoff, no delivery queue. A
//! duplicate trigger produces a duplicate message — callers that need
//! at-most-once semantics must de-duplicate above this contract.

use std::time::Duration;

use anyhow::{Context, Result};
use shared::{DeliveryOutcome, MessageKind};
use tracing::{info, warn};

use crate::domain::phone::normalize_phone;
use crate::domain::templates::render_message;

/// Messaging gateway connection settings.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway, e.g. "https://evolution.example.com"
    pub base_url: String,
    /// Gateway instance name appended to the send path
    pub instance: String,
    /// API key sent in the `apikey` header
    pub api_key: String,
    /// Hard timeout for one delivery attempt
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Default timeout; generous because the gateway is known to be
    /// slow under load.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(40);
}

/// Dispatches guardian notifications through the messaging gateway.
#[derive(Clone)]
pub struct NotificationDispatcher {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl NotificationDispatcher {
    /// Create a new dispatcher with a pre-configured HTTP client.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build gateway HTTP client")?;

        Ok(Self { client, config })
    }

    /// Send one message to a guardian's phone.
    ///
    /// Normalizes the phone, renders the fixed template for `kind`,
    /// and issues a single synchronous POST. The outcome is returned
    /// as a value, never an error: whatever happens here must not
    /// disturb a check-in that was already committed.
    pub async fn send(
        &self,
        raw_phone: &str,
        kind: MessageKind,
        child_name: &str,
        guardian_name: &str,
    ) -> DeliveryOutcome {
        let number = normalize_phone(raw_phone);
        let text = render_message(kind, child_name, guardian_name);

        let url = format!(
            "{}/message/sendText/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.instance
        );
        let payload = serde_json::json!({
            "number": number,
            "text": text,
            "linkPreview": false,
        });

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status = resp.status().as_u16();
                if status == 200 || status == 201 {
                    info!(%kind, number = %number, "Message delivered to gateway");
                    DeliveryOutcome::Delivered
                } else {
                    warn!(%kind, number = %number, status, "Gateway rejected message");
                    DeliveryOutcome::Rejected { status }
                }
            }
            Err(e) => {
                warn!(%kind, number = %number, error = %e, "Gateway unreachable");
                DeliveryOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
