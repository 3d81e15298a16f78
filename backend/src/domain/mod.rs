//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors)
//! - `auth` - Users, tiers and token claims
//! - `entitlement` - Tier/quota transitions and the premium gate
//! - `payment` - Payment records and status
//! - `content` - Templates and user content

pub mod auth;
pub mod content;
pub mod entitlement;
pub mod foundation;
pub mod payment;
