//! Shared application state for HTTP handlers.

use std::future::Future;
use std::sync::Arc;

use tracing::Instrument;

use crate::application::{AccessGate, AuthCore, ContentService, PaymentService, RequestExecutor, Scope};
use crate::domain::foundation::DomainError;

use super::error::ApiError;

/// Cloned per request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthCore>,
    pub gate: AccessGate,
    pub executor: RequestExecutor,
    pub payments: Arc<PaymentService>,
    pub contents: Arc<ContentService>,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthCore>,
        executor: RequestExecutor,
        payments: Arc<PaymentService>,
        contents: Arc<ContentService>,
    ) -> Self {
        Self {
            gate: AccessGate::new(auth.clone()),
            auth,
            executor,
            payments,
            contents,
        }
    }

    /// Runs a handler's unit of work under the scope's deadline, inside a
    /// span carrying the scope and (once extracted) the request source.
    pub async fn execute<T, F, Fut>(&self, scope: Scope, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(AppState) -> Fut,
        Fut: Future<Output = Result<T, DomainError>> + Send + 'static,
    {
        let span = tracing::info_span!("request", %scope, source = tracing::field::Empty);
        self.executor
            .run(scope, work(self.clone()))
            .instrument(span)
            .await
            .map_err(ApiError::from)
    }
}
