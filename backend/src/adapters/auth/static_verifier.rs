//! Static identity verifier for tests and local development.
//!
//! Maps fixed assertion strings to identities. Assertions not in the table
//! fail with `InvalidAssertion`.
//!
//! # Example
//!
//! ```ignore
//! use hbdtoyou::adapters::auth::StaticIdentityVerifier;
//!
//! let verifier = StaticIdentityVerifier::new()
//!     .with_identity("google-token-alice", "alice@example.com", "Alice");
//!
//! let identity = verifier.verify("google-token-alice").await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorKind};
use crate::ports::{IdentityVerifier, VerifiedIdentity};

#[derive(Debug, Default, Clone)]
pub struct StaticIdentityVerifier {
    identities: HashMap<String, VerifiedIdentity>,
    force_error: Option<DomainError>,
}

impl StaticIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `assertion` as proof of the given email and name.
    pub fn with_identity(
        mut self,
        assertion: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.identities.insert(
            assertion.into(),
            VerifiedIdentity {
                email: Some(email.into()),
                name: Some(name.into()),
            },
        );
        self
    }

    /// Accepts `assertion` but yields an arbitrary identity, e.g. one
    /// without an email.
    pub fn with_raw_identity(mut self, assertion: impl Into<String>, identity: VerifiedIdentity) -> Self {
        self.identities.insert(assertion.into(), identity);
        self
    }

    /// Forces every verification to fail with `error`.
    pub fn with_error(mut self, error: DomainError) -> Self {
        self.force_error = Some(error);
        self
    }

    pub fn identity_count(&self) -> usize {
        self.identities.len()
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, DomainError> {
        if let Some(error) = &self.force_error {
            return Err(error.clone());
        }

        self.identities.get(assertion).cloned().ok_or_else(|| {
            DomainError::new(ErrorKind::InvalidAssertion, "Unknown identity assertion")
        })
    }
}
