//! Per-scope request deadlines

use serde::Deserialize;
use std::time::Duration;

use crate::application::{Scope, ScopeTimeouts};

use super::error::ValidationError;

/// Scope deadline configuration.
///
/// `overrides` is a comma-separated list of `Scope=millis` pairs, e.g.
/// `CreatePayment=3000,UpdatePayment=8000`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScopesConfig {
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    #[serde(default)]
    pub overrides: Option<String>,
}

impl ScopesConfig {
    fn parse_overrides(&self) -> Result<Vec<(Scope, Duration)>, ValidationError> {
        let Some(raw) = self.overrides.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (name, millis) = pair
                    .split_once('=')
                    .ok_or_else(|| ValidationError::InvalidScopeTimeout(pair.to_string()))?;
                let scope: Scope = name
                    .trim()
                    .parse()
                    .map_err(ValidationError::InvalidScopeTimeout)?;
                let millis: u64 = millis
                    .trim()
                    .parse()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or_else(|| ValidationError::InvalidScopeTimeout(pair.to_string()))?;
                Ok((scope, Duration::from_millis(millis)))
            })
            .collect()
    }

    /// Builds the immutable timeout table.
    pub fn to_timeouts(&self) -> Result<ScopeTimeouts, ValidationError> {
        self.validate()?;
        Ok(self
            .parse_overrides()?
            .into_iter()
            .fold(
                ScopeTimeouts::new(Duration::from_millis(self.default_timeout_ms)),
                |table, (scope, timeout)| table.with_override(scope, timeout),
            ))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_timeout_ms == 0 {
            return Err(ValidationError::InvalidScopeTimeout(
                "default_timeout_ms must be positive".to_string(),
            ));
        }
        self.parse_overrides().map(|_| ())
    }
}

impl Default for ScopesConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_timeout_ms(),
            overrides: None,
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_five_seconds() {
        let timeouts = ScopesConfig::default().to_timeouts().unwrap();
        assert_eq!(timeouts.timeout_for(Scope::LoginSocial), Duration::from_millis(5000));
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = ScopesConfig {
            overrides: Some("CreatePayment=3000, UpdatePayment = 8000".to_string()),
            ..Default::default()
        };
        let timeouts = config.to_timeouts().unwrap();

        assert_eq!(timeouts.timeout_for(Scope::CreatePayment), Duration::from_millis(3000));
        assert_eq!(timeouts.timeout_for(Scope::UpdatePayment), Duration::from_millis(8000));
        assert_eq!(timeouts.timeout_for(Scope::GetPayments), Duration::from_millis(5000));
    }

    #[test]
    fn test_unknown_scope_is_rejected() {
        let config = ScopesConfig {
            overrides: Some("DropTables=1".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidScopeTimeout(_))
        ));
    }

    #[test]
    fn test_malformed_pair_is_rejected() {
        for raw in ["CreatePayment", "CreatePayment=abc", "CreatePayment=0"] {
            let config = ScopesConfig {
                overrides: Some(raw.to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn test_zero_default_is_rejected() {
        let config = ScopesConfig {
            default_timeout_ms: 0,
            overrides: None,
        };
        assert!(config.validate().is_err());
    }
}
