//! Entitlement state machine.
//!
//! # Transition table
//!
//! | Current tier | Event                       | Next tier | Next quota |
//! |--------------|-----------------------------|-----------|------------|
//! | any          | payment created             | pending   | 1          |
//! | any          | payment resolved = done     | premium   | 3          |
//! | any          | payment resolved = rejected | free      | 0          |
//! | any          | payment resolved = pending  | unchanged | unchanged  |
//!
//! Events are applied from whatever state the user is in, so the last write
//! wins: a rejection that lands after an approval resets the user to free.
//! Renewals ("payment created" while premium) re-derive the same pending
//! values as a first purchase.

use serde::{Deserialize, Serialize};

use crate::domain::auth::Tier;
use crate::domain::foundation::{DomainError, ErrorKind};
use crate::domain::payment::PaymentStatus;

/// A user's access class and remaining balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub tier: Tier,
    pub quota: u32,
}

impl Entitlement {
    pub fn new(tier: Tier, quota: u32) -> Self {
        Self { tier, quota }
    }
}

/// Lifecycle events that drive entitlement transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitlementEvent {
    /// A payment was submitted by the user.
    PaymentCreated,

    /// A payment's status was set.
    PaymentResolved(PaymentStatus),
}

/// Immutable policy table, built once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitlementPolicy {
    pending_quota: u32,
    premium_quota: u32,
}

impl EntitlementPolicy {
    /// Quota granted while a payment awaits resolution.
    pub const DEFAULT_PENDING_QUOTA: u32 = 1;

    /// Quota granted once a payment is done.
    pub const DEFAULT_PREMIUM_QUOTA: u32 = 3;

    pub fn new(pending_quota: u32, premium_quota: u32) -> Self {
        Self {
            pending_quota,
            premium_quota,
        }
    }

    /// Computes the entitlement that follows `event`.
    pub fn apply(&self, current: Entitlement, event: EntitlementEvent) -> Entitlement {
        match event {
            EntitlementEvent::PaymentCreated => Entitlement::new(Tier::Pending, self.pending_quota),
            EntitlementEvent::PaymentResolved(PaymentStatus::Done) => {
                Entitlement::new(Tier::Premium, self.premium_quota)
            }
            EntitlementEvent::PaymentResolved(PaymentStatus::Rejected) => {
                Entitlement::new(Tier::Free, 0)
            }
            EntitlementEvent::PaymentResolved(PaymentStatus::Pending)
            | EntitlementEvent::PaymentResolved(PaymentStatus::Unknown) => current,
        }
    }

    /// Premium-content gate: allowed only when `tier != Free` and `quota > 0`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidContentAccess` when the gate rejects.
    pub fn check_premium_access(&self, current: Entitlement) -> Result<(), DomainError> {
        if current.tier == Tier::Free || current.quota == 0 {
            return Err(DomainError::new(
                ErrorKind::InvalidContentAccess,
                format!(
                    "Premium template requires a paid tier with quota (tier: {}, quota: {})",
                    current.tier, current.quota
                ),
            ));
        }
        Ok(())
    }
}

impl Default for EntitlementPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PENDING_QUOTA, Self::DEFAULT_PREMIUM_QUOTA)
    }
}
