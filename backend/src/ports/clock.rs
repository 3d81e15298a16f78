//! Clock port.
//!
//! Token expiry and record timestamps read the current time through this
//! port so tests can control it.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
