//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Token secret key must be at least {0} bytes in production")]
    TokenSecretTooShort(usize),

    #[error("Token TTL must be between 60 seconds and 30 days")]
    InvalidTokenTtl,

    #[error("Bypass assertion is not allowed in production")]
    BypassNotAllowedInProduction,

    #[error("Invalid scope timeout: {0}")]
    InvalidScopeTimeout(String),

    #[error("Premium quota must be positive")]
    InvalidPremiumQuota,
}
