//! In-memory content and template repositories.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::content::{Content, Template};
use crate::domain::foundation::{ContentId, DomainError, TemplateId, UserId};
use crate::ports::{ContentRepository, TemplateRepository};

#[derive(Debug, Default)]
pub struct InMemoryContentRepository {
    contents: RwLock<HashMap<ContentId, Content>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn create(&self, content: &Content) -> Result<(), DomainError> {
        let mut contents = self.contents.write().await;
        if contents.contains_key(&content.id) {
            return Err(DomainError::validation("id", "Content already exists"));
        }
        contents.insert(content.id.clone(), content.clone());
        Ok(())
    }

    async fn update(&self, content: &Content) -> Result<(), DomainError> {
        let mut contents = self.contents.write().await;
        match contents.get_mut(&content.id) {
            Some(existing) => {
                *existing = content.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Content", &content.id)),
        }
    }

    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Content>, DomainError> {
        Ok(self.contents.read().await.get(id).cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Content>, DomainError> {
        let mut contents: Vec<Content> = self
            .contents
            .read()
            .await
            .values()
            .filter(|c| c.is_owned_by(user_id))
            .cloned()
            .collect();
        contents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contents)
    }
}

/// Template catalog, seeded once at startup.
#[derive(Debug, Default)]
pub struct InMemoryTemplateRepository {
    templates: HashMap<TemplateId, Template>,
}

impl InMemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.insert(template.id.clone(), template);
        self
    }

    pub fn with_templates(self, templates: impl IntoIterator<Item = Template>) -> Self {
        templates.into_iter().fold(self, Self::with_template)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<Template>, DomainError> {
        Ok(self.templates.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::TemplateLabel;
    use crate::domain::foundation::Timestamp;

    fn content(owner: &str, created_secs: i64) -> Content {
        Content::create(
            ContentId::generate(),
            UserId::new(owner).unwrap(),
            TemplateId::new("tpl-1").unwrap(),
            "{}",
            Timestamp::from_unix_secs(created_secs).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn list_by_user_filters_owner() {
        let repo = InMemoryContentRepository::new();
        let mine_old = content("alice", 1_000);
        let mine_new = content("alice", 2_000);
        repo.create(&mine_old).await.unwrap();
        repo.create(&mine_new).await.unwrap();
        repo.create(&content("bob", 1_500)).await.unwrap();

        let listed = repo
            .list_by_user(&UserId::new("alice").unwrap())
            .await
            .unwrap();

        assert_eq!(listed, vec![mine_new, mine_old]);
    }

    #[tokio::test]
    async fn seeded_template_is_found() {
        let id = TemplateId::new("tpl-premium").unwrap();
        let repo = InMemoryTemplateRepository::new().with_template(Template::new(
            id.clone(),
            "Birthday Deluxe",
            TemplateLabel::Premium,
            "https://cdn.example.com/deluxe.png",
        ));

        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert!(found.is_premium());
        assert!(repo
            .find_by_id(&TemplateId::new("missing").unwrap())
            .await
            .unwrap()
            .is_none());
    }
}
