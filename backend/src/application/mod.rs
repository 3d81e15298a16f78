//! Application layer - orchestrates domain operations across ports.
//!
//! - `executor` - bounded-time execution of a unit of work
//! - `auth_core` - login, token validation/refresh, user profiles
//! - `access_gate` - token + asserted actor verification
//! - `payment_service` / `content_service` - supporting operations

pub mod access_gate;
pub mod auth_core;
pub mod content_service;
pub mod executor;
pub mod payment_service;

pub use access_gate::AccessGate;
pub use auth_core::{AuthCore, AuthSettings, UpdateProfileCommand};
pub use content_service::{ContentService, CreateContentCommand, UpdateContentCommand};
pub use executor::{ExecutionOutcome, RequestExecutor, Scope, ScopeTimeouts};
pub use payment_service::{CreatePaymentCommand, PaymentService, UpdatePaymentCommand};
