//! AccessGate - verifies a bearer token against the actor id the caller
//! asserts.

use std::sync::Arc;

use crate::domain::auth::TokenClaims;
use crate::domain::foundation::{DomainError, ErrorKind};

use super::auth_core::AuthCore;

#[derive(Clone)]
pub struct AccessGate {
    auth: Arc<AuthCore>,
}

impl AccessGate {
    pub fn new(auth: Arc<AuthCore>) -> Self {
        Self { auth }
    }

    /// Returns the token's claims if it is valid and issued to
    /// `asserted_actor_id`.
    ///
    /// # Errors
    ///
    /// - `UnauthorizedAccess` if the token fails validation (the cause is
    ///   logged, not returned)
    /// - `InvalidUserId` if the token belongs to someone else
    pub fn authorize(&self, token: &str, asserted_actor_id: &str) -> Result<TokenClaims, DomainError> {
        let claims = self.auth.validate_token(token).map_err(|cause| {
            tracing::warn!(error = %cause, "Access denied: token rejected");
            DomainError::new(ErrorKind::UnauthorizedAccess, "Unauthorized access")
        })?;

        if claims.user_id.as_str() != asserted_actor_id {
            tracing::warn!(
                token_user = %claims.user_id,
                asserted_user = %asserted_actor_id,
                "Access denied: actor mismatch"
            );
            return Err(DomainError::new(
                ErrorKind::InvalidUserId,
                "Token does not belong to the asserted user",
            ));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::adapters::auth::{JwtTokenCodec, StaticIdentityVerifier};
    use crate::adapters::clock::ManualClock;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::application::auth_core::AuthSettings;
    use crate::domain::foundation::Timestamp;

    async fn gate_with_token() -> (AccessGate, String, String, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Timestamp::from_unix_secs(1_700_000_000).unwrap()));
        let core = Arc::new(AuthCore::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(JwtTokenCodec::new("gate-test-secret-with-32-bytes!!!")),
            Arc::new(StaticIdentityVerifier::new().with_identity("g", "a@x.com", "Alice")),
            clock.clone(),
            AuthSettings::new(Duration::from_secs(60)),
        ));
        let issued = core.login_with_identity_assertion("g").await.unwrap();
        let user_id = issued.claims.user_id.as_str().to_string();
        (AccessGate::new(core), issued.token, user_id, clock)
    }

    #[tokio::test]
    async fn matching_actor_is_authorized() {
        let (gate, token, user_id, _) = gate_with_token().await;

        let claims = gate.authorize(&token, &user_id).unwrap();

        assert_eq!(claims.user_id.as_str(), user_id);
    }

    #[tokio::test]
    async fn mismatched_actor_is_invalid_user_id() {
        let (gate, token, _, _) = gate_with_token().await;

        let err = gate.authorize(&token, "someone-else").unwrap_err();

        assert!(err.is(ErrorKind::InvalidUserId));
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let (gate, _, user_id, _) = gate_with_token().await;

        let err = gate.authorize("garbage", &user_id).unwrap_err();

        assert!(err.is(ErrorKind::UnauthorizedAccess));
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let (gate, token, user_id, clock) = gate_with_token().await;
        clock.advance_secs(61);

        let err = gate.authorize(&token, &user_id).unwrap_err();

        assert!(err.is(ErrorKind::UnauthorizedAccess));
    }
}
