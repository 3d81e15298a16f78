//! Content and template operations.
//!
//! Creating content from a premium template is gated on the creator's
//! stored entitlement at the moment of the request, not on the tier in
//! their token.

use std::sync::Arc;

use crate::domain::content::{Content, ContentStatus, Template};
use crate::domain::entitlement::EntitlementPolicy;
use crate::domain::foundation::{ContentId, DomainError, ErrorKind, TemplateId, UserId};
use crate::ports::{Clock, ContentRepository, TemplateRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CreateContentCommand {
    pub template_id: TemplateId,
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct UpdateContentCommand {
    pub detail: String,
    pub status: ContentStatus,
}

pub struct ContentService {
    contents: Arc<dyn ContentRepository>,
    templates: Arc<dyn TemplateRepository>,
    users: Arc<dyn UserRepository>,
    policy: EntitlementPolicy,
    clock: Arc<dyn Clock>,
}

impl ContentService {
    pub fn new(
        contents: Arc<dyn ContentRepository>,
        templates: Arc<dyn TemplateRepository>,
        users: Arc<dyn UserRepository>,
        policy: EntitlementPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            contents,
            templates,
            users,
            policy,
            clock,
        }
    }

    /// # Errors
    ///
    /// - `DataNotFound` if the template or creator doesn't exist
    /// - `InvalidContentAccess` if the template is premium and the creator
    ///   is on the free tier or out of quota
    /// - `ValidationFailed` if `detail` is not JSON
    pub async fn create(
        &self,
        owner: &UserId,
        cmd: CreateContentCommand,
    ) -> Result<Content, DomainError> {
        let template = self.get_template(&cmd.template_id).await?;

        if template.is_premium() {
            let user = self
                .users
                .find_by_id(owner)
                .await?
                .ok_or_else(|| DomainError::not_found("User", owner))?;
            self.policy.check_premium_access(user.entitlement())?;
        }

        let content = Content::create(
            ContentId::generate(),
            owner.clone(),
            template.id,
            cmd.detail,
            self.clock.now(),
        )?;
        self.contents.create(&content).await?;

        tracing::info!(content_id = %content.id, user_id = %owner, "Content created");
        Ok(content)
    }

    pub async fn get(&self, id: &ContentId) -> Result<Content, DomainError> {
        self.contents
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Content", id))
    }

    pub async fn list_by_user(&self, owner: &UserId) -> Result<Vec<Content>, DomainError> {
        self.contents.list_by_user(owner).await
    }

    /// Replaces detail and status. Only the owner may update.
    pub async fn update(
        &self,
        id: &ContentId,
        actor: &UserId,
        cmd: UpdateContentCommand,
    ) -> Result<Content, DomainError> {
        let mut content = self.get(id).await?;
        if !content.is_owned_by(actor) {
            return Err(DomainError::new(
                ErrorKind::UnauthorizedAccess,
                "Content belongs to another user",
            ));
        }

        content.detail = cmd.detail;
        content.status = cmd.status;
        content.updated_at = self.clock.now();
        content.validate()?;

        self.contents.update(&content).await?;
        Ok(content)
    }

    pub async fn get_template(&self, id: &TemplateId) -> Result<Template, DomainError> {
        self.templates
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Template", id))
    }
}
