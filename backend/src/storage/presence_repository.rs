//! SQLite repository for the append-only check-in log.
//!
//! Day filtering happens here, after the read: the entry timestamp is a
//! plain string column, and only rows whose timestamp parses under the
//! exact fixed format and lands on the requested day are returned.
//! Rows that fail to parse are dropped from the result, never raised —
//! a safety filter so one bad row can never take the presence view
//! down.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::CheckIn;
use sqlx::Row;
use tracing::debug;

use crate::domain::clock;
use crate::storage::db::DbConnection;
use crate::storage::traits::PresenceStorage;

/// Repository for check-in operations
#[derive(Clone)]
pub struct PresenceRepository {
    db: DbConnection,
}

impl PresenceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PresenceStorage for PresenceRepository {
    /// Store a check-in event in the database
    async fn store_checkin(&self, checkin: &CheckIn) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO checkins (id, child_id, child_name, guardian_name, guardian_phone, entry_timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&checkin.id)
        .bind(&checkin.child_id)
        .bind(&checkin.child_name)
        .bind(&checkin.guardian_name)
        .bind(&checkin.guardian_phone)
        .bind(&checkin.entry_timestamp)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// List all check-ins whose parsed entry timestamp falls on `day`
    async fn list_by_day(&self, day: NaiveDate) -> Result<Vec<CheckIn>> {
        let rows = sqlx::query(
            r#"
            SELECT id, child_id, child_name, guardian_name, guardian_phone, entry_timestamp
            FROM checkins
            WHERE entry_timestamp != ''
            ORDER BY entry_timestamp ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let checkins: Vec<CheckIn> = rows
            .iter()
            .map(|row| CheckIn {
                id: row.get("id"),
                child_id: row.get("child_id"),
                child_name: row.get("child_name"),
                guardian_name: row.get("guardian_name"),
                guardian_phone: row.get("guardian_phone"),
                entry_timestamp: row.get("entry_timestamp"),
            })
            .filter(|checkin| clock::entry_day(&checkin.entry_timestamp) == Some(day))
            .collect();

        debug!("Found {} check-ins for {}", checkins.len(), day);
        Ok(checkins)
    }
}
