//! Identity verifier port.
//!
//! Verifies a third-party identity assertion (e.g. a Google ID token) and
//! yields the identity it vouches for. Implementations exist for Google
//! and for a static table used in tests and local development.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Identity fields extracted from a verified assertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerifiedIdentity {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl VerifiedIdentity {
    /// Returns the email if it is present and non-blank.
    pub fn usable_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

/// Verifies identity assertions.
///
/// # Contract
///
/// Implementations must:
/// - Verify the assertion's signature, issuer, audience and expiry
/// - Return `InvalidAssertion` when any check fails
/// - Return `Internal` when the provider cannot be reached
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_email_is_not_usable() {
        let identity = VerifiedIdentity {
            email: Some("   ".to_string()),
            name: None,
        };
        assert_eq!(identity.usable_email(), None);
    }

    #[test]
    fn email_is_trimmed() {
        let identity = VerifiedIdentity {
            email: Some(" a@x.com ".to_string()),
            name: None,
        };
        assert_eq!(identity.usable_email(), Some("a@x.com"));
    }
}
