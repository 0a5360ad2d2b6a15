//! # Storage Traits
//!
//! Storage abstraction traits that let the domain layer work against
//! different backends without modification. Both stores are shared,
//! multi-writer, append-only resources: every write is an independent
//! insert with no cross-record invariant, so concurrent sessions never
//! need locking.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{CheckIn, Child};

/// Interface for the roster of registered children.
///
/// Deliberately has no update or delete: a roster record is immutable
/// once written.
#[async_trait]
pub trait RosterStorage: Send + Sync {
    /// Store a new child, durably and immediately visible to reads
    async fn store_child(&self, child: &Child) -> Result<()>;

    /// Retrieve a specific child by ID
    async fn get_child(&self, child_id: &str) -> Result<Option<Child>>;

    /// List all children ordered by name
    async fn list_children(&self) -> Result<Vec<Child>>;
}

/// Interface for the append-only check-in log.
#[async_trait]
pub trait PresenceStorage: Send + Sync {
    /// Store a new check-in event
    async fn store_checkin(&self, checkin: &CheckIn) -> Result<()>;

    /// List all check-ins whose entry timestamp falls on `day` in the
    /// room's timezone. Events with an unparsable timestamp are
    /// silently excluded, never raised.
    async fn list_by_day(&self, day: NaiveDate) -> Result<Vec<CheckIn>>;
}
