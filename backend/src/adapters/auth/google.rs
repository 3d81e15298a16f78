//! Google ID token verifier.
//!
//! Implements the `IdentityVerifier` port for Google Sign-In. An assertion
//! is a Google-issued ID token, verified by:
//!
//! 1. Fetching Google's JWKS (cached, refetched after the cache TTL)
//! 2. Checking the RS256 signature against the key named by `kid`
//! 3. Checking issuer, audience (our OAuth client id) and expiry
//!
//! Only the `email` and `name` claims are surfaced to the application.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorKind};
use crate::ports::{IdentityVerifier, VerifiedIdentity};

const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Configuration for the Google verifier.
#[derive(Debug, Clone)]
pub struct GoogleVerifierConfig {
    /// OAuth client id; ID tokens must name it as audience.
    pub client_id: String,

    pub jwks_url: String,

    pub jwks_cache_duration: Duration,
}

impl GoogleVerifierConfig {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            jwks_url: GOOGLE_JWKS_URL.to_string(),
            jwks_cache_duration: Duration::from_secs(3600),
        }
    }

    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = duration;
        self
    }

    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct GoogleClaims {
    aud: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<bool>,
    #[serde(default)]
    name: Option<String>,
}

struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
    cache_duration: Duration,
}

impl JwksCache {
    fn new(jwks: JwkSet, cache_duration: Duration) -> Self {
        Self {
            jwks,
            fetched_at: Instant::now(),
            cache_duration,
        }
    }

    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > self.cache_duration
    }
}

fn invalid_assertion(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorKind::InvalidAssertion, message)
}

/// Verifies Google ID tokens against Google's published keys.
pub struct GoogleIdentityVerifier {
    config: GoogleVerifierConfig,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl GoogleIdentityVerifier {
    /// Keys are fetched lazily on the first verification.
    pub fn new(config: GoogleVerifierConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            config,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, DomainError> {
        tracing::debug!(url = %self.config.jwks_url, "Fetching Google JWKS");

        let response = self
            .http_client
            .get(&self.config.jwks_url)
            .send()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to fetch JWKS: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::internal(format!(
                "JWKS endpoint returned {}",
                response.status()
            )));
        }

        let jwks: JwkSet = response
            .json()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to parse JWKS: {}", e)))?;

        tracing::debug!(keys = jwks.keys.len(), "Fetched Google JWKS");
        Ok(jwks)
    }

    async fn get_jwks(&self) -> Result<JwkSet, DomainError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(ref cached) = *cache {
                if !cached.is_expired() {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        let mut cache = self.jwks_cache.write().await;
        *cache = Some(JwksCache::new(jwks.clone(), self.config.jwks_cache_duration));

        Ok(jwks)
    }

    fn find_decoding_key(
        header: &jsonwebtoken::Header,
        jwks: &JwkSet,
    ) -> Result<DecodingKey, DomainError> {
        let kid = header
            .kid
            .as_ref()
            .ok_or_else(|| invalid_assertion("ID token missing 'kid' header"))?;

        let jwk = jwks
            .find(kid)
            .ok_or_else(|| invalid_assertion(format!("No Google key for kid {}", kid)))?;

        DecodingKey::from_jwk(jwk)
            .map_err(|e| invalid_assertion(format!("Unusable Google key: {}", e)))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&GOOGLE_ISSUERS);
        validation.set_audience(&[&self.config.client_id]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation
    }

    fn audience_matches(&self, aud: &str) -> bool {
        aud.as_bytes()
            .ct_eq(self.config.client_id.as_bytes())
            .into()
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, assertion: &str) -> Result<VerifiedIdentity, DomainError> {
        let header = decode_header(assertion)
            .map_err(|e| invalid_assertion(format!("Malformed ID token: {}", e)))?;

        let jwks = self.get_jwks().await?;
        let key = Self::find_decoding_key(&header, &jwks)?;

        let claims = decode::<GoogleClaims>(assertion, &key, &self.validation())
            .map_err(|e| invalid_assertion(format!("ID token rejected: {}", e)))?
            .claims;

        if !self.audience_matches(&claims.aud) {
            return Err(invalid_assertion("ID token audience mismatch"));
        }

        // Unverified addresses are not trusted as identity keys.
        let email = claims
            .email
            .filter(|_| claims.email_verified.unwrap_or(false));

        Ok(VerifiedIdentity {
            email,
            name: claims.name,
        })
    }
}

impl std::fmt::Debug for GoogleIdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleIdentityVerifier")
            .field("client_id", &self.config.client_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_google_jwks() {
        let config = GoogleVerifierConfig::new("client-123");
        assert_eq!(config.jwks_url, GOOGLE_JWKS_URL);
        assert_eq!(config.jwks_cache_duration, Duration::from_secs(3600));
    }

    #[test]
    fn config_with_custom_cache_duration() {
        let config =
            GoogleVerifierConfig::new("client-123").with_cache_duration(Duration::from_secs(60));
        assert_eq!(config.jwks_cache_duration, Duration::from_secs(60));
    }

    #[test]
    fn jwks_cache_expires_after_duration() {
        let cache = JwksCache::new(JwkSet { keys: vec![] }, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        assert!(cache.is_expired());
    }

    #[test]
    fn audience_must_match_exactly() {
        let verifier = GoogleIdentityVerifier::new(GoogleVerifierConfig::new("client-123"));
        assert!(verifier.audience_matches("client-123"));
        assert!(!verifier.audience_matches("client-1234"));
    }

    #[test]
    fn missing_kid_is_invalid_assertion() {
        let header = jsonwebtoken::Header::new(Algorithm::RS256);
        let Err(err) =
            GoogleIdentityVerifier::find_decoding_key(&header, &JwkSet { keys: vec![] })
        else {
            panic!("a header without kid must not resolve a key");
        };
        assert!(err.is(ErrorKind::InvalidAssertion));
    }

    #[tokio::test]
    async fn garbage_assertion_fails_before_network() {
        let verifier = GoogleIdentityVerifier::new(
            GoogleVerifierConfig::new("client-123").with_jwks_url("http://127.0.0.1:9/unreachable"),
        );
        let err = verifier.verify("not-a-token").await.unwrap_err();
        assert!(err.is(ErrorKind::InvalidAssertion));
    }

    #[test]
    fn verifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GoogleIdentityVerifier>();
    }
}
