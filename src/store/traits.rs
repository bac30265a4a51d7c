//! `UserStore` trait — async interface for the identity mapping.

use async_trait::async_trait;

use crate::error::DatabaseError;

/// Backend-agnostic store for the LINE sender → internal user mapping.
///
/// Create/read only; this service never updates or deletes users. A sender
/// identifier maps to at most one internal user id.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up the internal user id for a LINE sender, if registered.
    async fn get_user_id(&self, line_user_id: &str) -> Result<Option<i64>, DatabaseError>;

    /// Register a sender and return the internal user id.
    ///
    /// Idempotent: registering an already-known sender returns the existing
    /// id without creating a second row.
    async fn create_user(&self, line_user_id: &str) -> Result<i64, DatabaseError>;
}
