//! Error taxonomy for the domain services.
//!
//! Gateway outcomes are deliberately not represented here: a rejected
//! or unreachable gateway never rolls back the preceding write, so it
//! travels in [`shared::DeliveryOutcome`] instead of an error.

use thiserror::Error;

/// A recoverable failure reported to the initiating user.
///
/// None of these propagate as process-fatal conditions, and no variant
/// triggers an automatic retry.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A read or write against the roster or presence store failed.
    /// The operation is aborted with no partial state.
    #[error("store unavailable: {0}")]
    StoreUnavailable(anyhow::Error),

    /// Required input was missing or referenced an unknown record.
    /// No write was attempted.
    #[error("{0}")]
    ValidationFailed(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::ValidationFailed(message.into())
    }
}
