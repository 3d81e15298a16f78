//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - token codec and identity verifiers
//! - `clock` - system and manual clocks
//! - `http` - axum REST surface
//! - `memory` - in-memory repositories

pub mod auth;
pub mod clock;
pub mod http;
pub mod memory;
