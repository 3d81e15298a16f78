//! User repository port.
//!
//! Persists user identities. Records are never hard-deleted; lookups skip
//! records whose status is `Deleted`.
//!
//! Updates are last-write-wins; there is no optimistic concurrency token.

use async_trait::async_trait;

use crate::domain::auth::User;
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// - `UserAlreadyExists` if an active user already has this email
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Replaces an existing user.
    ///
    /// # Errors
    ///
    /// - `DataNotFound` if no active user has this id
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}
