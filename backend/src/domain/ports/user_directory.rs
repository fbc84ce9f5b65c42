//! Driving port for user registration and lookup.

use async_trait::async_trait;

use crate::domain::{Document, Error, InsertOutcome};

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every registered user. Unbounded.
    async fn list_users(&self) -> Result<Vec<Document>, Error>;

    /// Register a user. Duplicate emails are accepted.
    async fn create_user(&self, user: Document) -> Result<InsertOutcome, Error>;

    /// Exact-match lookup on `email`; `Ok(None)` when nobody has it.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<Document>, Error>;
}
