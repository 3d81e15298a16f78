//! Entitlement quota configuration

use serde::Deserialize;

use crate::domain::entitlement::EntitlementPolicy;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct EntitlementConfig {
    /// Quota while a payment awaits resolution
    #[serde(default = "default_pending_quota")]
    pub pending_quota: u32,

    /// Quota once a payment is done
    #[serde(default = "default_premium_quota")]
    pub premium_quota: u32,
}

impl EntitlementConfig {
    pub fn policy(&self) -> EntitlementPolicy {
        EntitlementPolicy::new(self.pending_quota, self.premium_quota)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.premium_quota == 0 {
            return Err(ValidationError::InvalidPremiumQuota);
        }
        Ok(())
    }
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            pending_quota: default_pending_quota(),
            premium_quota: default_premium_quota(),
        }
    }
}

fn default_pending_quota() -> u32 {
    EntitlementPolicy::DEFAULT_PENDING_QUOTA
}

fn default_premium_quota() -> u32 {
    EntitlementPolicy::DEFAULT_PREMIUM_QUOTA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy_defaults() {
        assert_eq!(EntitlementConfig::default().policy(), EntitlementPolicy::default());
    }

    #[test]
    fn test_zero_premium_quota_is_rejected() {
        let config = EntitlementConfig {
            premium_quota: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPremiumQuota));
    }
}
