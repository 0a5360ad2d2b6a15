//! SQLite repository for the roster of registered children.

use anyhow::Result;
use async_trait::async_trait;
use shared::Child;
use sqlx::Row;

use crate::storage::db::DbConnection;
use crate::storage::traits::RosterStorage;

/// Repository for roster operations
#[derive(Clone)]
pub struct RosterRepository {
    db: DbConnection,
}

impl RosterRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RosterStorage for RosterRepository {
    /// Store a child in the database
    async fn store_child(&self, child: &Child) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO children (id, name, guardian_name, guardian_phone, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&child.id)
        .bind(&child.name)
        .bind(&child.guardian_name)
        .bind(&child.guardian_phone)
        .bind(&child.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Get a child by ID
    async fn get_child(&self, child_id: &str) -> Result<Option<Child>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, guardian_name, guardian_phone, created_at
            FROM children
            WHERE id = ?
            "#,
        )
        .bind(child_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Child {
                id: r.get("id"),
                name: r.get("name"),
                guardian_name: r.get("guardian_name"),
                guardian_phone: r.get("guardian_phone"),
                created_at: r.get("created_at"),
            })),
            None => Ok(None),
        }
    }

    /// List all children ordered by name
    async fn list_children(&self) -> Result<Vec<Child>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, guardian_name, guardian_phone, created_at
            FROM children
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let children = rows
            .iter()
            .map(|row| Child {
                id: row.get("id"),
                name: row.get("name"),
                guardian_name: row.get("guardian_name"),
                guardian_phone: row.get("guardian_phone"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(children)
    }
}
