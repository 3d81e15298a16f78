//! User-owned content.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ContentId, DomainError, TemplateId, Timestamp, UserId};

/// Content visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Active,
    Inactive,
}

impl ContentStatus {
    pub fn value(&self) -> i32 {
        match self {
            ContentStatus::Active => 1,
            ContentStatus::Inactive => 2,
        }
    }
}

/// A piece of content rendered from a template.
///
/// `detail` holds the template-specific payload as JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub id: ContentId,
    pub user_id: UserId,
    pub template_id: TemplateId,
    pub detail: String,
    pub status: ContentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Content {
    /// Creates active content after checking the detail payload.
    pub fn create(
        id: ContentId,
        user_id: UserId,
        template_id: TemplateId,
        detail: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let content = Self {
            id,
            user_id,
            template_id,
            detail: detail.into(),
            status: ContentStatus::Active,
            created_at: now,
            updated_at: now,
        };
        content.validate()?;
        Ok(content)
    }

    /// `detail` must be a JSON document.
    pub fn validate(&self) -> Result<(), DomainError> {
        serde_json::from_str::<serde_json::Value>(&self.detail)
            .map_err(|e| DomainError::validation("detail", format!("Detail is not valid JSON: {}", e)))?;
        Ok(())
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorKind;

    fn create(detail: &str) -> Result<Content, DomainError> {
        Content::create(
            ContentId::generate(),
            UserId::new("user-1").unwrap(),
            TemplateId::new("tpl-1").unwrap(),
            detail,
            Timestamp::now(),
        )
    }

    #[test]
    fn new_content_is_active() {
        let content = create(r#"{"name":"Bob"}"#).unwrap();
        assert_eq!(content.status, ContentStatus::Active);
        assert!(content.is_owned_by(&UserId::new("user-1").unwrap()));
    }

    #[test]
    fn non_json_detail_is_rejected() {
        let err = create("not json").unwrap_err();
        assert!(err.is(ErrorKind::ValidationFailed));
        assert_eq!(err.details.get("field"), Some(&"detail".to_string()));
    }
}
