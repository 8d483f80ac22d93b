use crate::error::TaskError;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Shared cancellation flag. Clones observe the same flag; once set it stays
/// set.
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<CancellationToken>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CancellationToken::new()),
        }
    }

    /// Set the flag and wake every task waiting on [`cancelled`](Self::cancelled).
    /// Idempotent.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// Future that resolves once the token is cancelled.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.inner.cancelled()
    }

    /// Drive `fut` until it completes or the token is cancelled, whichever
    /// comes first. A token that is already cancelled never polls `fut`.
    pub async fn run_until_cancelled<F>(&self, fut: F) -> Result<F::Output, TaskError>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.inner.cancelled() => Err(TaskError::Cancelled),
            output = fut => Ok(output),
        }
    }

    /// True when both handles share one flag.
    pub fn same_as(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_cancel_is_idempotent() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());

        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(token.same_as(&other));
        assert!(!token.same_as(&CancelToken::new()));

        other.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancelled_resolves_immediately_when_set() {
        let token = CancelToken::new();
        token.cancel();
        block_on(token.cancelled());
    }

    #[test]
    fn test_cancel_from_other_thread_wakes_waiter() {
        let token = CancelToken::new();
        let remote = token.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });

        block_on(token.cancelled());
        assert!(token.is_cancelled());
        handle.join().unwrap();
    }

    #[test]
    fn test_run_until_cancelled() {
        let token = CancelToken::new();
        assert_eq!(block_on(token.run_until_cancelled(async { 7 })), Ok(7));

        token.cancel();
        let err = block_on(token.run_until_cancelled(async { 7 })).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_already_cancelled_never_polls_work() {
        let token = CancelToken::new();
        token.cancel();

        let polled = AtomicBool::new(false);
        let result = block_on(token.run_until_cancelled(async {
            polled.store(true, Ordering::SeqCst);
        }));

        assert_eq!(result, Err(TaskError::Cancelled));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[test]
    fn test_run_until_cancelled_interrupts_pending_work() {
        let token = CancelToken::new();
        let remote = token.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });

        let result = block_on(token.run_until_cancelled(future::pending::<()>()));
        assert_eq!(result, Err(TaskError::Cancelled));
        handle.join().unwrap();
    }
}
