//! Payment record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ContentId, DomainError, PaymentId, Timestamp, UserId};

use super::PaymentStatus;

/// A payment submitted by a user as proof of purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub content_id: Option<ContentId>,
    pub amount: i64,
    pub proof_payment_url: String,
    pub date: Option<Timestamp>,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Payment {
    /// Creates a new payment. New payments always start pending.
    pub fn submit(
        id: PaymentId,
        user_id: UserId,
        content_id: Option<ContentId>,
        amount: i64,
        proof_payment_url: impl Into<String>,
        date: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let payment = Self {
            id,
            user_id,
            content_id,
            amount,
            proof_payment_url: proof_payment_url.into(),
            date,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        payment.validate()?;
        Ok(payment)
    }

    /// Checks the fields a client controls.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.proof_payment_url.trim().is_empty() {
            return Err(DomainError::validation(
                "proof_payment_url",
                "Proof of payment URL is required",
            ));
        }
        if self.amount <= 0 {
            return Err(DomainError::validation("amount", "Amount must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorKind;

    fn submit(amount: i64, url: &str) -> Result<Payment, DomainError> {
        Payment::submit(
            PaymentId::generate(),
            UserId::new("user-1").unwrap(),
            None,
            amount,
            url,
            None,
            Timestamp::now(),
        )
    }

    #[test]
    fn submitted_payment_is_pending() {
        let payment = submit(15000, "https://proof.example.com/1.png").unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = submit(0, "https://proof.example.com/1.png").unwrap_err();
        assert!(err.is(ErrorKind::ValidationFailed));
        assert_eq!(err.details.get("field"), Some(&"amount".to_string()));
    }

    #[test]
    fn missing_proof_url_is_rejected() {
        let err = submit(15000, "  ").unwrap_err();
        assert_eq!(err.details.get("field"), Some(&"proof_payment_url".to_string()));
    }
}
