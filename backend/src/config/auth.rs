//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum signing-secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Token signing and identity provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret shared by every instance
    pub token_secret_key: String,

    /// Lifetime of issued tokens in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,

    /// Google OAuth client id; ID tokens must be issued for it
    pub google_client_id: String,

    /// Pre-shared assertion for operational logins (never in production)
    #[serde(default)]
    pub bypass_assertion: Option<String>,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,
}

impl AuthConfig {
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Get JWKS cache TTL as Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    /// Returns the bypass assertion if one is set and non-blank.
    pub fn bypass_assertion(&self) -> Option<&str> {
        self.bypass_assertion
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Validate authentication configuration
    ///
    /// Production requires a long secret and forbids the bypass assertion.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.token_secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("TOKEN_SECRET_KEY"));
        }
        if self.google_client_id.is_empty() {
            return Err(ValidationError::MissingRequired("GOOGLE_CLIENT_ID"));
        }
        if !(60..=30 * 24 * 3600).contains(&self.token_ttl_secs) {
            return Err(ValidationError::InvalidTokenTtl);
        }

        if *environment == Environment::Production {
            if self.token_secret_key.len() < MIN_PRODUCTION_SECRET_BYTES {
                return Err(ValidationError::TokenSecretTooShort(
                    MIN_PRODUCTION_SECRET_BYTES,
                ));
            }
            if self.bypass_assertion().is_some() {
                return Err(ValidationError::BypassNotAllowedInProduction);
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret_key: String::new(),
            token_ttl_secs: default_token_ttl(),
            google_client_id: String::new(),
            bypass_assertion: None,
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
        }
    }
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AuthConfig {
        AuthConfig {
            token_secret_key: "0123456789abcdef0123456789abcdef".to_string(),
            google_client_id: "client.apps.googleusercontent.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl(), Duration::from_secs(3600));
        assert_eq!(config.jwks_cache_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig {
            token_secret_key: String::new(),
            ..valid()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("TOKEN_SECRET_KEY"))
        );
    }

    #[test]
    fn test_validation_missing_client_id() {
        let config = AuthConfig {
            google_client_id: String::new(),
            ..valid()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_short_secret_only_rejected_in_production() {
        let config = AuthConfig {
            token_secret_key: "short".to_string(),
            ..valid()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::TokenSecretTooShort(32))
        );
    }

    #[test]
    fn test_bypass_rejected_in_production() {
        let config = AuthConfig {
            bypass_assertion: Some("ops@example.com".to_string()),
            ..valid()
        };
        assert!(config.validate(&Environment::Staging).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::BypassNotAllowedInProduction)
        );
    }

    #[test]
    fn test_blank_bypass_is_ignored() {
        let config = AuthConfig {
            bypass_assertion: Some("  ".to_string()),
            ..valid()
        };
        assert_eq!(config.bypass_assertion(), None);
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_token_ttl_bounds() {
        let config = AuthConfig {
            token_ttl_secs: 10,
            ..valid()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidTokenTtl)
        );
    }
}
