//! Payment operations and the entitlement writes they trigger.
//!
//! Each mutation is two independent writes: the payment first, then the
//! owner's (tier, quota). There is no transaction spanning them; if the
//! second write fails the payment stays recorded and the error is returned.

use std::sync::Arc;

use crate::domain::entitlement::{EntitlementEvent, EntitlementPolicy};
use crate::domain::foundation::{ContentId, DomainError, PaymentId, Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::ports::{Clock, PaymentRepository, UserRepository};

/// Command to submit a payment for the acting user.
#[derive(Debug, Clone)]
pub struct CreatePaymentCommand {
    pub content_id: Option<ContentId>,
    pub amount: i64,
    pub proof_payment_url: String,
    pub date: Option<Timestamp>,
}

/// Command to replace a payment's fields, typically to resolve it.
#[derive(Debug, Clone)]
pub struct UpdatePaymentCommand {
    pub content_id: Option<ContentId>,
    pub amount: i64,
    pub proof_payment_url: String,
    pub date: Option<Timestamp>,
    pub status: PaymentStatus,
}

pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    users: Arc<dyn UserRepository>,
    policy: EntitlementPolicy,
    clock: Arc<dyn Clock>,
}

impl PaymentService {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        users: Arc<dyn UserRepository>,
        policy: EntitlementPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            payments,
            users,
            policy,
            clock,
        }
    }

    /// Records a pending payment and moves its owner to the pending tier.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for a non-positive amount or missing proof URL
    /// - `DataNotFound` if the owner no longer exists
    pub async fn create(
        &self,
        owner: &UserId,
        cmd: CreatePaymentCommand,
    ) -> Result<Payment, DomainError> {
        let payment = Payment::submit(
            PaymentId::generate(),
            owner.clone(),
            cmd.content_id,
            cmd.amount,
            cmd.proof_payment_url,
            cmd.date,
            self.clock.now(),
        )?;

        self.payments.create(&payment).await?;
        tracing::info!(payment_id = %payment.id, user_id = %owner, "Payment submitted");

        self.apply_entitlement(owner, EntitlementEvent::PaymentCreated)
            .await?;
        Ok(payment)
    }

    /// Replaces a payment and applies its status to the owner's entitlement.
    ///
    /// # Errors
    ///
    /// - `DataNotFound` if the payment or its owner doesn't exist
    /// - `ValidationFailed` for invalid fields
    pub async fn update(
        &self,
        id: &PaymentId,
        cmd: UpdatePaymentCommand,
    ) -> Result<Payment, DomainError> {
        let mut payment = self.get(id).await?;

        payment.content_id = cmd.content_id;
        payment.amount = cmd.amount;
        payment.proof_payment_url = cmd.proof_payment_url;
        payment.date = cmd.date;
        payment.status = cmd.status;
        payment.updated_at = self.clock.now();
        payment.validate()?;

        self.payments.update(&payment).await?;
        tracing::info!(payment_id = %payment.id, status = %payment.status, "Payment updated");

        self.apply_entitlement(&payment.user_id, EntitlementEvent::PaymentResolved(payment.status))
            .await?;
        Ok(payment)
    }

    pub async fn get(&self, id: &PaymentId) -> Result<Payment, DomainError> {
        self.payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment", id))
    }

    pub async fn list(&self) -> Result<Vec<Payment>, DomainError> {
        self.payments.list().await
    }

    async fn apply_entitlement(
        &self,
        user_id: &UserId,
        event: EntitlementEvent,
    ) -> Result<(), DomainError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;

        let current = user.entitlement();
        let next = self.policy.apply(current, event);
        if next == current {
            return Ok(());
        }

        user.apply_entitlement(next, self.clock.now());
        self.users.update(&user).await.map_err(|e| {
            tracing::error!(
                user_id = %user_id,
                error = %e,
                "Entitlement write failed after payment write"
            );
            e
        })?;

        tracing::info!(
            user_id = %user_id,
            from_tier = %current.tier,
            to_tier = %next.tier,
            quota = next.quota,
            "Entitlement changed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::SystemClock;
    use crate::adapters::memory::{InMemoryPaymentRepository, InMemoryUserRepository};
    use crate::domain::auth::{Tier, User};
    use crate::domain::foundation::ErrorKind;

    struct Fixture {
        service: PaymentService,
        users: Arc<InMemoryUserRepository>,
        user: User,
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = User::register(UserId::generate(), "Alice", "a@x.com", Timestamp::now());
        users.create(&user).await.unwrap();

        let service = PaymentService::new(
            Arc::new(InMemoryPaymentRepository::new()),
            users.clone(),
            EntitlementPolicy::default(),
            Arc::new(SystemClock),
        );
        Fixture { service, users, user }
    }

    fn create_cmd() -> CreatePaymentCommand {
        CreatePaymentCommand {
            content_id: None,
            amount: 25_000,
            proof_payment_url: "https://proof.example.com/1.png".to_string(),
            date: None,
        }
    }

    fn resolve_cmd(payment: &Payment, status: PaymentStatus) -> UpdatePaymentCommand {
        UpdatePaymentCommand {
            content_id: payment.content_id.clone(),
            amount: payment.amount,
            proof_payment_url: payment.proof_payment_url.clone(),
            date: payment.date,
            status,
        }
    }

    async fn stored(f: &Fixture) -> User {
        f.users.find_by_id(&f.user.id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn create_records_pending_payment_and_user() {
        let f = fixture().await;

        let payment = f.service.create(&f.user.id, create_cmd()).await.unwrap();

        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.user_id, f.user.id);
        let user = stored(&f).await;
        assert_eq!((user.tier, user.quota), (Tier::Pending, 1));
    }

    #[tokio::test]
    async fn invalid_payment_leaves_user_untouched() {
        let f = fixture().await;
        let mut cmd = create_cmd();
        cmd.amount = 0;

        let err = f.service.create(&f.user.id, cmd).await.unwrap_err();

        assert!(err.is(ErrorKind::ValidationFailed));
        assert_eq!(stored(&f).await.tier, Tier::Free);
        assert!(f.service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn done_payment_grants_premium() {
        let f = fixture().await;
        let payment = f.service.create(&f.user.id, create_cmd()).await.unwrap();

        f.service
            .update(&payment.id, resolve_cmd(&payment, PaymentStatus::Done))
            .await
            .unwrap();

        let user = stored(&f).await;
        assert_eq!((user.tier, user.quota), (Tier::Premium, 3));
    }

    #[tokio::test]
    async fn rejected_after_done_resets_to_free() {
        let f = fixture().await;
        let payment = f.service.create(&f.user.id, create_cmd()).await.unwrap();
        f.service
            .update(&payment.id, resolve_cmd(&payment, PaymentStatus::Done))
            .await
            .unwrap();

        f.service
            .update(&payment.id, resolve_cmd(&payment, PaymentStatus::Rejected))
            .await
            .unwrap();

        let user = stored(&f).await;
        assert_eq!((user.tier, user.quota), (Tier::Free, 0));
    }

    #[tokio::test]
    async fn update_of_unknown_payment_is_not_found() {
        let f = fixture().await;
        let payment = Payment::submit(
            PaymentId::generate(),
            f.user.id.clone(),
            None,
            1,
            "https://proof.example.com/x.png",
            None,
            Timestamp::now(),
        )
        .unwrap();

        let err = f
            .service
            .update(&payment.id, resolve_cmd(&payment, PaymentStatus::Done))
            .await
            .unwrap_err();

        assert!(err.is(ErrorKind::DataNotFound));
    }

    #[tokio::test]
    async fn payment_for_unknown_owner_surfaces_not_found() {
        let f = fixture().await;
        let ghost = UserId::generate();

        let err = f.service.create(&ghost, create_cmd()).await.unwrap_err();

        assert!(err.is(ErrorKind::DataNotFound));
        // The payment write already happened; the two writes are not atomic.
        assert_eq!(f.service.list().await.unwrap().len(), 1);
    }
}
