//! Bounded-time request execution.
//!
//! Every privileged operation runs as a unit of work on its own task while
//! the caller races three outcomes: a value on the result channel, an error
//! on the error channel, or the scope's deadline. Exactly one outcome is
//! returned.
//!
//! On deadline the task is not aborted. It keeps running to completion and
//! its late outcome lands in a channel of capacity one via `try_send`, so
//! the abandoned task never blocks and is simply dropped afterwards.
//!
//! ```text
//!            ┌──────────► Completed (value)
//!  Running ──┼──────────► Failed    (error, or panic → Internal)
//!            └──────────► TimedOut  (deadline → RequestTimeout)
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::domain::foundation::{DomainError, ErrorKind};

/// Named operation classes, each with its own deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    LoginSocial,
    RefreshToken,
    GetUserById,
    UpdateUser,
    CreatePayment,
    GetPayments,
    GetPaymentById,
    UpdatePayment,
    CreateContent,
    GetContents,
    GetContentById,
    UpdateContent,
    GetTemplateById,
}

impl Scope {
    pub const ALL: [Scope; 13] = [
        Scope::LoginSocial,
        Scope::RefreshToken,
        Scope::GetUserById,
        Scope::UpdateUser,
        Scope::CreatePayment,
        Scope::GetPayments,
        Scope::GetPaymentById,
        Scope::UpdatePayment,
        Scope::CreateContent,
        Scope::GetContents,
        Scope::GetContentById,
        Scope::UpdateContent,
        Scope::GetTemplateById,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::LoginSocial => "LoginSocial",
            Scope::RefreshToken => "RefreshToken",
            Scope::GetUserById => "GetUserById",
            Scope::UpdateUser => "UpdateUser",
            Scope::CreatePayment => "CreatePayment",
            Scope::GetPayments => "GetPayments",
            Scope::GetPaymentById => "GetPaymentById",
            Scope::UpdatePayment => "UpdatePayment",
            Scope::CreateContent => "CreateContent",
            Scope::GetContents => "GetContents",
            Scope::GetContentById => "GetContentById",
            Scope::UpdateContent => "UpdateContent",
            Scope::GetTemplateById => "GetTemplateById",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| format!("unknown scope '{}'", s))
    }
}

/// Immutable scope → deadline table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeTimeouts {
    default: Duration,
    overrides: HashMap<Scope, Duration>,
}

impl ScopeTimeouts {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

    pub fn new(default: Duration) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, scope: Scope, timeout: Duration) -> Self {
        self.overrides.insert(scope, timeout);
        self
    }

    pub fn timeout_for(&self, scope: Scope) -> Duration {
        self.overrides.get(&scope).copied().unwrap_or(self.default)
    }
}

impl Default for ScopeTimeouts {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

/// Terminal state of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Completed,
    Failed,
    TimedOut,
}

/// Runs units of work under per-scope deadlines.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    timeouts: Arc<ScopeTimeouts>,
}

impl RequestExecutor {
    pub fn new(timeouts: ScopeTimeouts) -> Self {
        Self {
            timeouts: Arc::new(timeouts),
        }
    }

    /// Runs `work` on a fresh task and waits for whichever comes first:
    /// its value, its error, or the scope deadline.
    ///
    /// # Errors
    ///
    /// - Whatever error `work` returns
    /// - `Internal` if `work` panics
    /// - `RequestTimeout` if the deadline passes first
    pub async fn run<T, F>(&self, scope: Scope, work: F) -> Result<T, DomainError>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, DomainError>> + Send + 'static,
    {
        let deadline = self.timeouts.timeout_for(scope);
        let (result_tx, mut result_rx) = mpsc::channel::<T>(1);
        let (error_tx, mut error_rx) = mpsc::channel::<DomainError>(1);

        tokio::spawn(
            async move {
                let delivered = match AssertUnwindSafe(work).catch_unwind().await {
                    Ok(Ok(value)) => result_tx.try_send(value).is_ok(),
                    Ok(Err(err)) => error_tx.try_send(err).is_ok(),
                    Err(_) => error_tx
                        .try_send(DomainError::internal(format!("{} unit of work panicked", scope)))
                        .is_ok(),
                };
                if !delivered {
                    tracing::debug!(%scope, "Discarding late outcome after deadline");
                }
            }
            .instrument(tracing::Span::current()),
        );

        let (outcome, result) = tokio::select! {
            Some(value) = result_rx.recv() => (ExecutionOutcome::Completed, Ok(value)),
            Some(err) = error_rx.recv() => (ExecutionOutcome::Failed, Err(err)),
            _ = tokio::time::sleep(deadline) => {
                tracing::warn!(%scope, timeout_ms = deadline.as_millis() as u64, "Request timed out");
                (
                    ExecutionOutcome::TimedOut,
                    Err(DomainError::new(ErrorKind::RequestTimeout, format!("{} exceeded its deadline", scope))),
                )
            }
        };

        tracing::trace!(%scope, ?outcome, "Request finished");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn executor(timeout_ms: u64) -> RequestExecutor {
        RequestExecutor::new(ScopeTimeouts::new(Duration::from_millis(timeout_ms)))
    }

    // Scope table

    #[test]
    fn scope_names_round_trip() {
        for scope in Scope::ALL {
            assert_eq!(scope.as_str().parse::<Scope>().unwrap(), scope);
        }
    }

    #[test]
    fn unknown_scope_name_is_rejected() {
        assert!("DeleteEverything".parse::<Scope>().is_err());
    }

    #[test]
    fn overrides_apply_only_to_their_scope() {
        let timeouts = ScopeTimeouts::default()
            .with_override(Scope::CreatePayment, Duration::from_millis(3000));

        assert_eq!(timeouts.timeout_for(Scope::CreatePayment), Duration::from_millis(3000));
        assert_eq!(timeouts.timeout_for(Scope::UpdatePayment), Duration::from_millis(5000));
    }

    // Execution

    #[tokio::test(start_paused = true)]
    async fn completed_work_returns_value() {
        let result = executor(5000)
            .run(Scope::GetPayments, async { Ok::<_, DomainError>(42) })
            .await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_work_returns_its_error() {
        let result = executor(5000)
            .run(Scope::GetPayments, async {
                Err::<(), _>(DomainError::not_found("Payment", "p-1"))
            })
            .await;

        assert!(result.unwrap_err().is(ErrorKind::DataNotFound));
    }

    #[tokio::test(start_paused = true)]
    async fn work_finishing_just_before_deadline_is_not_timed_out() {
        let result = executor(5000)
            .run(Scope::CreatePayment, async {
                tokio::time::sleep(Duration::from_millis(4999)).await;
                Ok::<_, DomainError>("done")
            })
            .await;

        assert_eq!(result.unwrap(), "done");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_work_times_out_and_finishes_in_background() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let result = executor(5000)
            .run(Scope::CreatePayment, async move {
                tokio::time::sleep(Duration::from_secs(10)).await;
                flag.store(true, Ordering::SeqCst);
                Ok::<_, DomainError>(())
            })
            .await;

        assert!(result.unwrap_err().is(ErrorKind::RequestTimeout));
        assert!(!finished.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn late_error_after_timeout_does_not_block() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let result = executor(100)
            .run(Scope::UpdatePayment, async move {
                tokio::time::sleep(Duration::from_millis(500)).await;
                flag.store(true, Ordering::SeqCst);
                Err::<(), _>(DomainError::internal("late"))
            })
            .await;

        assert!(result.unwrap_err().is(ErrorKind::RequestTimeout));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_work_is_reported_as_internal() {
        let result = executor(5000)
            .run(Scope::GetTemplateById, async {
                if true {
                    panic!("boom");
                }
                Ok::<(), DomainError>(())
            })
            .await;

        assert!(result.unwrap_err().is(ErrorKind::Internal));
    }

    #[tokio::test(start_paused = true)]
    async fn scope_override_controls_deadline() {
        let exec = RequestExecutor::new(
            ScopeTimeouts::default().with_override(Scope::LoginSocial, Duration::from_millis(50)),
        );

        let result = exec
            .run(Scope::LoginSocial, async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok::<_, DomainError>(())
            })
            .await;

        assert!(result.unwrap_err().is(ErrorKind::RequestTimeout));
    }
}
