//! Template catalog entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::TemplateId;

/// Access label of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateLabel {
    Unknown,
    Free,
    Premium,
}

impl TemplateLabel {
    pub fn value(&self) -> i32 {
        match self {
            TemplateLabel::Unknown => 0,
            TemplateLabel::Free => 1,
            TemplateLabel::Premium => 2,
        }
    }

    /// Returns true if creating content from this template needs the
    /// premium gate.
    pub fn requires_entitlement(&self) -> bool {
        matches!(self, TemplateLabel::Premium)
    }
}

/// A content template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub label: TemplateLabel,
    pub thumbnail_uri: String,
}

impl Template {
    pub fn new(
        id: TemplateId,
        name: impl Into<String>,
        label: TemplateLabel,
        thumbnail_uri: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            label,
            thumbnail_uri: thumbnail_uri.into(),
        }
    }

    pub fn is_premium(&self) -> bool {
        self.label.requires_entitlement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_premium_label_requires_entitlement() {
        assert!(TemplateLabel::Premium.requires_entitlement());
        assert!(!TemplateLabel::Free.requires_entitlement());
        assert!(!TemplateLabel::Unknown.requires_entitlement());
    }

    #[test]
    fn label_serializes_lowercase() {
        let json = serde_json::to_string(&TemplateLabel::Premium).unwrap();
        assert_eq!(json, "\"premium\"");
    }
}
