//! In-memory payment repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, PaymentId};
use crate::domain::payment::Payment;
use crate::ports::PaymentRepository;

#[derive(Debug, Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<HashMap<PaymentId, Payment>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self.payments.write().await;
        if payments.contains_key(&payment.id) {
            return Err(DomainError::validation("id", "Payment already exists"));
        }
        payments.insert(payment.id.clone(), payment.clone());
        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self.payments.write().await;
        match payments.get_mut(&payment.id) {
            Some(existing) => {
                *existing = payment.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Payment", &payment.id)),
        }
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self.payments.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Payment>, DomainError> {
        let mut payments: Vec<Payment> = self.payments.read().await.values().cloned().collect();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(payments)
    }
}
