//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Authentication Ports
//!
//! - `TokenCodec` - Signs and verifies bearer tokens
//! - `IdentityVerifier` - Verifies third-party identity assertions
//! - `Clock` - Current time source
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - User identities
//! - `PaymentRepository` - Payment records
//! - `ContentRepository` / `TemplateRepository` - Content and template catalog

mod clock;
mod content_repository;
mod identity_verifier;
mod payment_repository;
mod token_codec;
mod user_repository;

pub use clock::Clock;
pub use content_repository::{ContentRepository, TemplateRepository};
pub use identity_verifier::{IdentityVerifier, VerifiedIdentity};
pub use payment_repository::PaymentRepository;
pub use token_codec::TokenCodec;
pub use user_repository::UserRepository;
