//! Identity claims carried by a bearer token.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::{Tier, User};

/// Claims encapsulated in a token.
///
/// Self-contained: validating them needs only the signature and the expiry,
/// never a lookup in the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub tier: Tier,
    pub expires_at: Timestamp,
}

impl TokenClaims {
    /// Snapshots a user's identity into claims valid until `expires_at`.
    pub fn for_user(user: &User, expires_at: Timestamp) -> Self {
        Self {
            user_id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            tier: user.tier,
            expires_at,
        }
    }

    /// Returns true once `now` has reached the expiry.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        !now.is_before(&self.expires_at)
    }

    /// Returns a copy with a different expiry.
    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Compares everything except the expiry.
    pub fn same_identity(&self, other: &TokenClaims) -> bool {
        self.clone().with_expiry(other.expires_at) == *other
    }
}

/// A signed token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_expiring_at(secs: i64) -> TokenClaims {
        TokenClaims {
            user_id: UserId::new("user-1").unwrap(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            full_name: "Alice".to_string(),
            tier: Tier::Free,
            expires_at: Timestamp::from_unix_secs(secs).unwrap(),
        }
    }

    #[test]
    fn claims_are_expired_at_the_expiry_instant() {
        let claims = claims_expiring_at(1_000);

        assert!(!claims.is_expired_at(Timestamp::from_unix_secs(999).unwrap()));
        assert!(claims.is_expired_at(Timestamp::from_unix_secs(1_000).unwrap()));
        assert!(claims.is_expired_at(Timestamp::from_unix_secs(1_001).unwrap()));
    }

    #[test]
    fn same_identity_ignores_expiry() {
        let a = claims_expiring_at(1_000);
        let b = claims_expiring_at(2_000);
        assert!(a.same_identity(&b));

        let mut c = claims_expiring_at(1_000);
        c.tier = Tier::Premium;
        assert!(!a.same_identity(&c));
    }

    #[test]
    fn for_user_copies_identity_fields() {
        let now = Timestamp::now();
        let mut user = User::register(UserId::generate(), "Alice", "a@x.com", now);
        user.username = "alice".to_string();
        user.tier = Tier::Premium;

        let expires_at = now.plus_secs(3600);
        let claims = TokenClaims::for_user(&user, expires_at);
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.tier, Tier::Premium);
        assert_eq!(claims.expires_at, expires_at);
    }
}
