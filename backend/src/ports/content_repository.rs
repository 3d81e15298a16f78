//! Content and template repository ports.

use async_trait::async_trait;

use crate::domain::content::{Content, Template};
use crate::domain::foundation::{ContentId, DomainError, TemplateId, UserId};

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn create(&self, content: &Content) -> Result<(), DomainError>;

    /// Replaces existing content.
    ///
    /// # Errors
    ///
    /// - `DataNotFound` if the content doesn't exist
    async fn update(&self, content: &Content) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Content>, DomainError>;

    /// Lists a user's content, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Content>, DomainError>;
}

/// Read-only template catalog.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<Template>, DomainError>;
}
