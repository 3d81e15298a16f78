//! Payment domain module.
//!
//! Payment records and their status. A payment's lifecycle drives the
//! owner's entitlement (see `domain::entitlement`).

mod payment;
mod status;

pub use payment::Payment;
pub use status::PaymentStatus;
