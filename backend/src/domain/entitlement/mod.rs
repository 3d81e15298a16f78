//! Entitlement domain module.
//!
//! Pure decision logic mapping payment lifecycle events to a user's next
//! (tier, quota), plus the premium-content gate.

mod policy;

pub use policy::{Entitlement, EntitlementEvent, EntitlementPolicy};
