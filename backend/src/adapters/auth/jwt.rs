//! HS256 token codec.
//!
//! Implements the `TokenCodec` port with a shared secret. The wire claims
//! use the field names existing clients already read:
//!
//! | Claim      | Meaning                    |
//! |------------|----------------------------|
//! | `user_id`  | user identifier            |
//! | `username` | username                   |
//! | `email`    | email                      |
//! | `fullname` | display name               |
//! | `type`     | tier as integer (0..=3)    |
//! | `exp`      | expiry, unix seconds       |
//!
//! Expiry is deliberately not validated here; `AuthCore` compares it
//! against its clock so an expired token maps to `ExpiredToken` rather
//! than `InvalidToken`.

use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::auth::{IssuedToken, Tier, TokenClaims};
use crate::domain::foundation::{DomainError, ErrorKind, Timestamp, UserId};
use crate::ports::TokenCodec;

#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    user_id: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    fullname: String,
    #[serde(rename = "type", default)]
    tier: i32,
    exp: i64,
}

impl WireClaims {
    fn from_claims(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.user_id.as_str().to_string(),
            username: claims.username.clone(),
            email: claims.email.clone(),
            fullname: claims.full_name.clone(),
            tier: claims.tier.value(),
            exp: claims.expires_at.as_unix_secs(),
        }
    }

    fn into_claims(self) -> Result<TokenClaims, DomainError> {
        let user_id = UserId::new(self.user_id)
            .map_err(|_| DomainError::new(ErrorKind::InvalidToken, "Token has no user id"))?;
        let expires_at = Timestamp::from_unix_secs(self.exp)
            .ok_or_else(|| DomainError::new(ErrorKind::InvalidToken, "Token expiry out of range"))?;

        Ok(TokenClaims {
            user_id,
            username: self.username,
            email: self.email,
            full_name: self.fullname,
            tier: Tier::from_value(self.tier),
            expires_at,
        })
    }
}

/// HMAC-SHA256 token codec over a static shared secret.
pub struct JwtTokenCodec {
    secret: Secret<String>,
}

impl JwtTokenCodec {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(
        &self,
        claims: &TokenClaims,
        now: Timestamp,
        ttl: Duration,
    ) -> Result<IssuedToken, DomainError> {
        let claims = claims.clone().with_expiry(now.plus(ttl).truncated_to_secs());
        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());

        let token = encode(&Header::new(Algorithm::HS256), &WireClaims::from_claims(&claims), &key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken { token, claims })
    }

    fn parse(&self, token: &str) -> Result<TokenClaims, DomainError> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());

        let data = decode::<WireClaims>(token, &key, &Self::validation()).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
            match e.kind() {
                JwtErrorKind::InvalidSignature => {
                    tracing::debug!("Token signature mismatch");
                }
                JwtErrorKind::InvalidAlgorithm => {
                    tracing::debug!("Token signed with unexpected algorithm");
                }
                _ => {
                    tracing::debug!("Token decode failed: {}", e);
                }
            }
            DomainError::new(ErrorKind::InvalidToken, "Token could not be verified")
        })?;

        data.claims.into_claims()
    }
}

impl std::fmt::Debug for JwtTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenCodec").finish_non_exhaustive()
    }
}
