//! Request context extraction.
//!
//! Runs inside the unit of work, in a fixed order: source tag, asserted
//! actor id, bearer token. The first missing piece short-circuits.

use axum::http::{header, HeaderMap};
use serde::de::DeserializeOwned;

use crate::application::AccessGate;
use crate::domain::auth::TokenClaims;
use crate::domain::foundation::{DomainError, ErrorKind};

pub const SOURCE_HEADER: &str = "X-Source";
pub const USER_ID_HEADER: &str = "X-UserID";

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Reads the `X-Source` tag and records it on the current span.
pub fn source(headers: &HeaderMap) -> Result<String, DomainError> {
    let source = header_value(headers, SOURCE_HEADER)
        .ok_or_else(|| DomainError::new(ErrorKind::SourceNotProvided, "X-Source header missing"))?;
    tracing::Span::current().record("source", source);
    Ok(source.to_string())
}

/// Caller identity as asserted by the request headers, not yet verified.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub source: String,
    pub actor_id: String,
    pub token: String,
}

impl RequestContext {
    pub fn extract(headers: &HeaderMap) -> Result<Self, DomainError> {
        let source = source(headers)?;

        let actor_id = header_value(headers, USER_ID_HEADER)
            .ok_or_else(|| DomainError::new(ErrorKind::InvalidUserId, "X-UserID header missing"))?
            .to_string();

        let token = header_value(headers, header::AUTHORIZATION.as_str())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::new(ErrorKind::InvalidToken, "Bearer token missing"))?
            .to_string();

        Ok(Self {
            source,
            actor_id,
            token,
        })
    }

    pub fn authorize(&self, gate: &AccessGate) -> Result<TokenClaims, DomainError> {
        gate.authorize(&self.token, &self.actor_id)
    }
}

/// Decodes a JSON body; any failure is `BadRequest`.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, DomainError> {
    serde_json::from_slice(body)
        .map_err(|e| DomainError::new(ErrorKind::BadRequest, format!("Malformed body: {}", e)))
}
