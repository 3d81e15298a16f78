//! Authentication domain module.
//!
//! User identities, access tiers and the claims a bearer token carries.
//! No provider or codec dependencies live here.

mod claims;
mod tier;
mod user;

pub use claims::{IssuedToken, TokenClaims};
pub use tier::Tier;
pub use user::{User, UserStatus};
