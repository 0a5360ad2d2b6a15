//! # Domain Module
//!
//! Business logic for the kids-room service: registration, check-in,
//! presence derivation, the session gate, and guardian notification.
//! Everything here depends on the storage traits, never on a concrete
//! backend.

pub mod checkin_service;
pub mod clock;
pub mod errors;
pub mod notification;
pub mod phone;
pub mod presence_service;
pub mod roster_service;
pub mod session_service;
pub mod templates;

pub use checkin_service::CheckInService;
pub use errors::ServiceError;
pub use notification::{GatewayConfig, NotificationDispatcher};
pub use presence_service::PresenceService;
pub use roster_service::RosterService;
pub use session_service::SessionService;
