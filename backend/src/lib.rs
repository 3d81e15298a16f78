//! hbdtoyou - greeting-page backend
//!
//! Social login, session tokens, payment-driven entitlements and
//! template-based content, served over a versioned HTTP API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
