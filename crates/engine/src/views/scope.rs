//! Cancellation scope tying in-flight fetches to a view's lifetime

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Owned by a controller; cancelled on teardown
///
/// Futures run through [`ViewScope::run`] resolve to `None` once the scope
/// is cancelled, so late responses never reach a dead view.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive `fut` unless the scope is or becomes cancelled
    ///
    /// An already-cancelled scope never polls `fut`.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = fut => Some(out),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_runs_to_completion() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_cancelled_scope_never_polls() {
        let scope = ViewScope::new();
        scope.cancel();

        let polled = Arc::new(AtomicBool::new(false));
        let flag = polled.clone();
        let out = scope
            .run(async move {
                flag.store(true, Ordering::SeqCst);
                1
            })
            .await;

        assert_eq!(out, None);
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_fetch() {
        let scope = Arc::new(ViewScope::new());
        let canceller = scope.clone();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            canceller.cancel();
        });
        assert_eq!(scope.run(std::future::pending::<()>()).await, None);
        assert!(scope.is_cancelled());
    }
}
