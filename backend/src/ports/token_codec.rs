//! Token codec port.
//!
//! Encodes identity claims into a signed, time-bounded bearer token and
//! decodes them back. Signing is CPU-bound, so the port is synchronous.
//!
//! # Contract
//!
//! - `issue` stamps `expires_at = now + ttl` (whole seconds) before signing
//! - `parse` verifies signature and structure only; expiry is the caller's
//!   check, so that expired-but-authentic tokens are distinguishable
//! - The same secret signs and verifies; there is no key rotation

use std::time::Duration;

use crate::domain::auth::{IssuedToken, TokenClaims};
use crate::domain::foundation::{DomainError, Timestamp};

pub trait TokenCodec: Send + Sync {
    /// Signs `claims` with a fresh expiry.
    ///
    /// # Errors
    ///
    /// - `Internal` if the claims cannot be serialized or signed
    fn issue(
        &self,
        claims: &TokenClaims,
        now: Timestamp,
        ttl: Duration,
    ) -> Result<IssuedToken, DomainError>;

    /// Verifies and decodes a token.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` for a wrong signature, wrong algorithm or malformed
    ///   token
    fn parse(&self, token: &str) -> Result<TokenClaims, DomainError>;
}
