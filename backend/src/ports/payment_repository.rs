//! Payment repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PaymentId};
use crate::domain::payment::Payment;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Replaces an existing payment.
    ///
    /// # Errors
    ///
    /// - `DataNotFound` if the payment doesn't exist
    async fn update(&self, payment: &Payment) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError>;

    /// Lists all payments, newest first.
    async fn list(&self) -> Result<Vec<Payment>, DomainError>;
}
