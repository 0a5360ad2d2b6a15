//! # Storage Module
//!
//! Data persistence for the kids-room service. Two stores, both
//! append-only from the application's point of view:
//!
//! - **Roster**: registered children and their guardian contacts
//! - **Presence**: the check-in event log, system of record for
//!   "who arrived when"
//!
//! The domain layer depends only on the traits in [`traits`]; the
//! SQLite repositories here are the one concrete backend.

pub mod db;
pub mod presence_repository;
pub mod roster_repository;
pub mod traits;

pub use db::DbConnection;
pub use presence_repository::PresenceRepository;
pub use roster_repository::RosterRepository;
pub use traits::{PresenceStorage, RosterStorage};
