//! Payment status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Status of a payment.
///
/// Any status may follow any other; the most recent update wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unknown,
    Done,
    Pending,
    Rejected,
}

impl PaymentStatus {
    /// Returns the integer storage value.
    pub fn value(&self) -> i32 {
        match self {
            PaymentStatus::Unknown => 0,
            PaymentStatus::Done => 1,
            PaymentStatus::Pending => 2,
            PaymentStatus::Rejected => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unknown => "unknown",
            PaymentStatus::Done => "done",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Rejected => "rejected",
        }
    }

    /// Parses a client-supplied status. Only the three known statuses are
    /// accepted.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "done" => Ok(PaymentStatus::Done),
            "pending" => Ok(PaymentStatus::Pending),
            "rejected" => Ok(PaymentStatus::Rejected),
            other => Err(DomainError::validation(
                "status",
                format!("Invalid payment status: {}", other),
            )),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorKind;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(PaymentStatus::parse("done").unwrap(), PaymentStatus::Done);
        assert_eq!(PaymentStatus::parse("pending").unwrap(), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::parse("rejected").unwrap(), PaymentStatus::Rejected);
    }

    #[test]
    fn rejects_unknown_status() {
        let err = PaymentStatus::parse("refunded").unwrap_err();
        assert!(err.is(ErrorKind::ValidationFailed));
        assert!(PaymentStatus::parse("unknown").is_err());
    }

    #[test]
    fn storage_values_are_stable() {
        assert_eq!(PaymentStatus::Done.value(), 1);
        assert_eq!(PaymentStatus::Pending.value(), 2);
        assert_eq!(PaymentStatus::Rejected.value(), 3);
    }
}
