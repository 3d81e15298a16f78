//! In-memory repository adapters.
//!
//! Thread-safe via `tokio::sync::RwLock`. Suitable for single-server
//! deployments, local development and tests. Nothing is persisted across
//! restarts; a SQL-backed implementation would replace these behind the
//! same ports.

mod content_repository;
mod payment_repository;
mod user_repository;

pub use content_repository::{InMemoryContentRepository, InMemoryTemplateRepository};
pub use payment_repository::InMemoryPaymentRepository;
pub use user_repository::InMemoryUserRepository;
