//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and the error taxonomy that form the
//! vocabulary of the hbdtoyou domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorKind, ValidationError};
pub use ids::{ContentId, PaymentId, TemplateId, UserId};
pub use timestamp::Timestamp;
