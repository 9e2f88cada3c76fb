//! SQLite key/value backend
//!
//! One table, `settings(key, value, updated_at)`, created on open.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};
use super::traits::KeyValueStore;

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run migrations.
    /// `:memory:` gives a private in-memory database.
    pub fn open(path: &Path) -> DomainResult<Self> {
        let conn = Connection::open(path).map_err(|e| DomainError::Storage(format!("Failed to open db: {}", e)))?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .map_err(|e| DomainError::Storage(e.to_string()))?;
    Ok(())
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let conn = self.conn.lock().await;
        conn.query_row("SELECT value FROM settings WHERE key = ?", params![key], |row| {
            row.get::<_, String>(0)
        })
        .optional()
        .map_err(|e| DomainError::Storage(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?, ?, ?)",
            params![key, value, chrono::Utc::now().timestamp_millis()],
        )
        .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn unset(&self, key: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM settings WHERE key = ?", params![key])
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(())
    }
}
