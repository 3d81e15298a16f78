//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HBDTOYOU` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use hbdtoyou::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod auth;
mod entitlement;
mod error;
mod scopes;
mod server;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_BYTES};
pub use entitlement::EntitlementConfig;
pub use error::{ConfigError, ValidationError};
pub use scopes::ScopesConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, log level)
    #[serde(default)]
    pub server: ServerConfig,

    /// Token signing and Google Sign-In
    pub auth: AuthConfig,

    /// Per-scope request deadlines
    #[serde(default)]
    pub scopes: ScopesConfig,

    /// Pending/premium quotas
    #[serde(default)]
    pub entitlement: EntitlementConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HBDTOYOU` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HBDTOYOU__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HBDTOYOU__AUTH__TOKEN_SECRET_KEY=...` -> `auth.token_secret_key = ...`
    /// - `HBDTOYOU__SCOPES__OVERRIDES=CreatePayment=3000` -> `scopes.overrides`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HBDTOYOU")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.scopes.validate()?;
        self.entitlement.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Scope;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Env vars are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "HBDTOYOU__AUTH__TOKEN_SECRET_KEY",
        "HBDTOYOU__AUTH__GOOGLE_CLIENT_ID",
        "HBDTOYOU__AUTH__BYPASS_ASSERTION",
        "HBDTOYOU__SERVER__PORT",
        "HBDTOYOU__SERVER__ENVIRONMENT",
        "HBDTOYOU__SCOPES__OVERRIDES",
        "HBDTOYOU__ENTITLEMENT__PREMIUM_QUOTA",
    ];

    fn set_minimal_env() {
        env::set_var("HBDTOYOU__AUTH__TOKEN_SECRET_KEY", "0123456789abcdef0123456789abcdef");
        env::set_var("HBDTOYOU__AUTH__GOOGLE_CLIENT_ID", "client.apps.googleusercontent.com");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.auth.google_client_id, "client.apps.googleusercontent.com");
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.scopes.default_timeout_ms, 5000);
        assert_eq!(config.entitlement.pending_quota, 1);
        assert_eq!(config.entitlement.premium_quota, 3);
    }

    #[test]
    fn test_missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("HBDTOYOU__AUTH__GOOGLE_CLIENT_ID", "client");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    fn test_scope_overrides_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HBDTOYOU__SCOPES__OVERRIDES", "CreatePayment=3000");
        let result = AppConfig::load();
        clear_env();

        let timeouts = result.unwrap().scopes.to_timeouts().unwrap();
        assert_eq!(timeouts.timeout_for(Scope::CreatePayment), Duration::from_millis(3000));
    }

    #[test]
    fn test_production_rejects_bypass() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HBDTOYOU__SERVER__ENVIRONMENT", "production");
        env::set_var("HBDTOYOU__AUTH__BYPASS_ASSERTION", "ops@example.com");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::BypassNotAllowedInProduction)
        );
    }
}
