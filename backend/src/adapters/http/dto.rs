//! HTTP DTOs (Data Transfer Objects).
//!
//! Field names follow what existing clients send and read.

use serde::{Deserialize, Serialize};

use crate::domain::auth::{IssuedToken, User};
use crate::domain::content::{Content, ContentStatus, Template, TemplateLabel};
use crate::domain::foundation::Timestamp;
use crate::domain::payment::Payment;

// ════════════════════════════════════════════════════════════════════════════════
// Envelopes
// ════════════════════════════════════════════════════════════════════════════════

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Failure envelope: `{"errors": [CODE]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            errors: vec![code.into()],
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Auth
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Identity assertion from the provider (Google ID token).
    pub token_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub fullname: String,
    pub email: String,
    pub token: String,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            user_id: issued.claims.user_id.to_string(),
            fullname: issued.claims.full_name,
            email: issued.claims.email,
            token: issued.token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: Timestamp,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.claims.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub fullname: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "type")]
    pub tier: String,
    pub quota: u32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            fullname: user.full_name,
            username: user.username,
            email: user.email,
            tier: user.tier.to_string(),
            quota: user.quota,
        }
    }
}

/// Profile update. Tier and quota are not client-writable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub fullname: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Payments
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    #[serde(default)]
    pub content_id: Option<String>,
    pub amount: i64,
    pub proof_payment_url: String,
    #[serde(default)]
    pub date: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePaymentRequest {
    #[serde(default)]
    pub content_id: Option<String>,
    pub amount: i64,
    pub proof_payment_url: String,
    #[serde(default)]
    pub date: Option<Timestamp>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: String,
    pub user_id: String,
    pub content_id: Option<String>,
    pub amount: i64,
    pub proof_payment_url: String,
    pub date: Option<Timestamp>,
    pub status: String,
    pub created_at: Timestamp,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id.to_string(),
            user_id: p.user_id.to_string(),
            content_id: p.content_id.map(|c| c.to_string()),
            amount: p.amount,
            proof_payment_url: p.proof_payment_url,
            date: p.date,
            status: p.status.to_string(),
            created_at: p.created_at,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Contents & Templates
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentRequest {
    pub template_id: String,
    pub detail_content_json_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContentRequest {
    pub detail_content_json_text: String,
    pub status: ContentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentResponse {
    pub id: String,
    pub user_id: String,
    pub template_id: String,
    pub detail_content_json_text: String,
    pub status: ContentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Content> for ContentResponse {
    fn from(c: Content) -> Self {
        Self {
            id: c.id.to_string(),
            user_id: c.user_id.to_string(),
            template_id: c.template_id.to_string(),
            detail_content_json_text: c.detail,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub id: String,
    pub name: String,
    pub label: TemplateLabel,
    pub thumbnail_uri: String,
}

impl From<Template> for TemplateResponse {
    fn from(t: Template) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name,
            label: t.label,
            thumbnail_uri: t.thumbnail_uri,
        }
    }
}
