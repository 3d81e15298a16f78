//! Endpoint handlers, grouped by area.

pub mod auth;
pub mod contents;
pub mod payments;
