//! libSQL backend — async `UserStore` implementation.
//!
//! Supports local file and in-memory databases. The in-memory variant
//! backs the tests.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase};
use tracing::info;

use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::UserStore;

/// A registered user row.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub line_user_id: String,
    pub created_at: DateTime<Utc>,
}

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        info!(path = %path.display(), "Database opened");

        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;

        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    /// Fetch a full user row, including its registration timestamp.
    pub async fn get_user(&self, line_user_id: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, line_user_id, created_at FROM users WHERE line_user_id = ?1",
                libsql::params![line_user_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("Failed to look up user: {e}")))?;

        let row = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("Failed to read user row: {e}")))?;

        match row {
            Some(row) => {
                let id: i64 = row
                    .get(0)
                    .map_err(|e| DatabaseError::Query(format!("Failed to parse user id: {e}")))?;
                let line_user_id: String = row.get(1).map_err(|e| {
                    DatabaseError::Query(format!("Failed to parse line_user_id: {e}"))
                })?;
                let created_str: String = row.get(2).map_err(|e| {
                    DatabaseError::Query(format!("Failed to parse created_at: {e}"))
                })?;
                Ok(Some(User {
                    id,
                    line_user_id,
                    created_at: parse_datetime(&created_str),
                }))
            }
            None => Ok(None),
        }
    }

    /// Number of registered users.
    pub async fn count_users(&self) -> Result<i64, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT COUNT(*) FROM users", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("Failed to count users: {e}")))?;

        let row = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("Failed to read user count: {e}")))?;

        match row {
            Some(row) => row
                .get(0)
                .map_err(|e| DatabaseError::Query(format!("Failed to parse user count: {e}"))),
            None => Ok(0),
        }
    }
}

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    // SQLite datetime() output, with and without fractional seconds
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

#[async_trait]
impl UserStore for LibSqlBackend {
    async fn get_user_id(&self, line_user_id: &str) -> Result<Option<i64>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id FROM users WHERE line_user_id = ?1",
                libsql::params![line_user_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("Failed to look up user: {e}")))?;

        let row = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("Failed to read user row: {e}")))?;

        match row {
            Some(row) => {
                let id: i64 = row
                    .get(0)
                    .map_err(|e| DatabaseError::Query(format!("Failed to parse user id: {e}")))?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    async fn create_user(&self, line_user_id: &str) -> Result<i64, DatabaseError> {
        // UNIQUE on line_user_id makes repeat registration a no-op; the
        // read-back below returns the surviving row either way.
        self.conn
            .execute(
                "INSERT OR IGNORE INTO users (line_user_id) VALUES (?1)",
                libsql::params![line_user_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("Failed to create user: {e}")))?;

        match self.get_user_id(line_user_id).await? {
            Some(id) => Ok(id),
            None => Err(DatabaseError::Query(format!(
                "User row missing after insert for {line_user_id}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_sender_has_no_user_id() {
        let backend = LibSqlBackend::new_memory().await.unwrap();
        assert_eq!(backend.get_user_id("U1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_then_get() {
        let backend = LibSqlBackend::new_memory().await.unwrap();
        let id = backend.create_user("U1").await.unwrap();
        assert_eq!(backend.get_user_id("U1").await.unwrap(), Some(id));
    }

    #[tokio::test]
    async fn create_is_idempotent() {
        let backend = LibSqlBackend::new_memory().await.unwrap();
        let first = backend.create_user("U1").await.unwrap();
        let second = backend.create_user("U1").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(backend.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn distinct_senders_get_distinct_ids() {
        let backend = LibSqlBackend::new_memory().await.unwrap();
        let a = backend.create_user("U1").await.unwrap();
        let b = backend.create_user("U2").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(backend.count_users().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn get_user_returns_full_row() {
        let backend = LibSqlBackend::new_memory().await.unwrap();
        let id = backend.create_user("U1").await.unwrap();

        let user = backend.get_user("U1").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.line_user_id, "U1");
        assert!(user.created_at > DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn parse_datetime_formats() {
        assert_eq!(
            parse_datetime("2026-08-30T12:00:00Z"),
            DateTime::parse_from_rfc3339("2026-08-30T12:00:00Z").unwrap()
        );
        assert_ne!(
            parse_datetime("2026-08-30 12:00:00"),
            DateTime::<Utc>::MIN_UTC
        );
        assert_eq!(parse_datetime("garbage"), DateTime::<Utc>::MIN_UTC);
    }
}
