//! User identity record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use crate::domain::entitlement::Entitlement;

use super::Tier;

/// Record status. Users are never hard-deleted; deleted records are
/// invisible to every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Deleted,
}

/// A user identity.
///
/// # Invariants
///
/// - `id` is unique and immutable
/// - `email` is unique among active users
/// - `created_at` never changes after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub tier: Tier,
    pub quota: u32,
    pub status: UserStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Creates a user on first social login: free tier, no quota.
    pub fn register(
        id: UserId,
        full_name: impl Into<String>,
        email: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            username: String::new(),
            email: email.into(),
            tier: Tier::Free,
            quota: 0,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if lookups should see this record.
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn entitlement(&self) -> Entitlement {
        Entitlement::new(self.tier, self.quota)
    }

    /// Overwrites tier and quota.
    pub fn apply_entitlement(&mut self, entitlement: Entitlement, now: Timestamp) {
        self.tier = entitlement.tier;
        self.quota = entitlement.quota;
        self.updated_at = now;
    }
}
