use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered child and their guardian contact details.
///
/// Roster records are append-only: once registered, a child is never
/// edited or removed through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    /// Child ID in format: "child::<epoch_millis>"
    pub id: String,
    pub name: String,
    /// Name of the responsible guardian (may be empty)
    pub guardian_name: String,
    /// Guardian phone as entered at registration (free text, digits expected)
    pub guardian_phone: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// An immutable record of a child's arrival in the room.
///
/// All child fields are snapshotted from the roster at check-in time and
/// never re-joined later. There is no corresponding checkout record; a
/// check-in counts towards presence until the next calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    /// Check-in ID in format: "checkin::<uuid>"
    pub id: String,
    pub child_id: String,
    pub child_name: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    /// Wall-clock entry time, "YYYY-MM-DD HH:MM:SS" (America/Sao_Paulo)
    pub entry_timestamp: String,
}

/// The kind of message sent to a guardian's phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    /// Sent once after a check-in is recorded
    Arrival,
    /// The child needs to go to the bathroom
    Bathroom,
    /// The child is crying / missing their guardian
    Distress,
    /// The guardian is asked to come to the room
    UrgentCall,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Arrival => write!(f, "arrival"),
            MessageKind::Bathroom => write!(f, "bathroom"),
            MessageKind::Distress => write!(f, "distress"),
            MessageKind::UrgentCall => write!(f, "urgent-call"),
        }
    }
}

/// Outcome of one dispatch attempt against the messaging gateway.
///
/// Observed once, synchronously. There is no retry and no delivery
/// queue: a duplicate trigger produces a duplicate message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// Gateway accepted the message (HTTP 200 or 201)
    Delivered,
    /// Gateway answered with any other status
    Rejected { status: u16 },
    /// The request never completed (timeout, refused, DNS)
    Failed { reason: String },
}

/// Request for registering a new child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterChildRequest {
    pub child_name: String,
    pub guardian_name: String,
    pub guardian_phone: String,
}

/// Response after registering a child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildResponse {
    pub child: Child,
    pub success_message: String,
}

/// Response listing all registered children, ordered by name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildListResponse {
    pub children: Vec<Child>,
}

/// Request for confirming a child's arrival
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckInRequest {
    pub child_id: String,
}

/// Response after a check-in was recorded.
///
/// `delivery` reports the arrival notification outcome; the check-in
/// itself is already committed regardless of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckInResponse {
    pub checkin: CheckIn,
    pub delivery: DeliveryOutcome,
}

/// Request for a room-action notification targeting one present child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomActionRequest {
    pub kind: MessageKind,
}

/// Response after a room-action dispatch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomActionResponse {
    pub delivery: DeliveryOutcome,
}

/// The derived "currently in the room" view for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresenceView {
    /// The calendar day this view covers (ISO 8601 date)
    pub day: String,
    /// RFC 3339 timestamp of when the view was derived
    pub generated_at: String,
    pub children: Vec<CheckIn>,
}

/// Response after opening a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartSessionResponse {
    pub session_id: String,
}

/// Request for authenticating a session with the shared room password
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionLoginRequest {
    pub session_id: String,
    pub password: String,
}

/// Response from a session login attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionLoginResponse {
    pub success: bool,
    pub message: String,
}

impl Child {
    /// Generate a child ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("child::{}", epoch_millis)
    }

    /// Parse a child ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, RecordIdError> {
        parse_record_id(id, "child")
    }
}

impl CheckIn {
    /// Generate a fresh check-in ID.
    ///
    /// Check-ins use random ids rather than the timestamp scheme:
    /// two staff members can confirm arrivals in the same instant, and
    /// both events must be stored.
    pub fn generate_id() -> String {
        format!("checkin::{}", uuid::Uuid::new_v4())
    }
}

fn parse_record_id(id: &str, prefix: &str) -> Result<u64, RecordIdError> {
    let parts: Vec<&str> = id.split("::").collect();
    if parts.len() != 2 || parts[0] != prefix {
        return Err(RecordIdError::InvalidFormat);
    }

    parts[1]
        .parse::<u64>()
        .map_err(|_| RecordIdError::InvalidTimestamp)
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for RecordIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIdError::InvalidFormat => write!(f, "Invalid record ID format"),
            RecordIdError::InvalidTimestamp => write!(f, "Invalid timestamp in record ID"),
        }
    }
}

impl std::error::Error for RecordIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_child_id() {
        let id = Child::generate_id(1702516122000);
        assert_eq!(id, "child::1702516122000");
    }

    #[test]
    fn test_parse_child_id() {
        assert_eq!(Child::parse_id("child::1702516122000"), Ok(1702516122000));
        assert_eq!(
            Child::parse_id("session::1702516122000"),
            Err(RecordIdError::InvalidFormat)
        );
        assert_eq!(
            Child::parse_id("child::notanumber"),
            Err(RecordIdError::InvalidTimestamp)
        );
    }

    #[test]
    fn test_checkin_ids_are_unique() {
        let first = CheckIn::generate_id();
        let second = CheckIn::generate_id();
        assert!(first.starts_with("checkin::"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_message_kind_serde_names() {
        let json = serde_json::to_string(&MessageKind::UrgentCall).unwrap();
        assert_eq!(json, "\"urgent-call\"");
        let kind: MessageKind = serde_json::from_str("\"bathroom\"").unwrap();
        assert_eq!(kind, MessageKind::Bathroom);
    }

    #[test]
    fn test_message_kind_display() {
        assert_eq!(MessageKind::Arrival.to_string(), "arrival");
        assert_eq!(MessageKind::UrgentCall.to_string(), "urgent-call");
    }
}
