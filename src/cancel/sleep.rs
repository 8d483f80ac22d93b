//! Cancellable delays for animated or paced tasks.

use super::CancelToken;
use crate::error::TaskError;
use std::time::Duration;

/// Wait for `duration`, giving up early if `token` is cancelled.
///
/// A zero duration returns immediately without suspending. A token that is
/// already cancelled fails immediately. Otherwise the timer is raced against
/// the token and dropped as soon as either side wins, so no timer outlives a
/// cancelled task.
///
/// Requires a tokio runtime with the time driver enabled.
pub async fn sleep(duration: Duration, token: Option<&CancelToken>) -> Result<(), TaskError> {
    if duration.is_zero() {
        return Ok(());
    }

    let Some(token) = token else {
        tokio::time::sleep(duration).await;
        return Ok(());
    };

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(TaskError::Cancelled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_completes() {
        let token = CancelToken::new();
        let start = Instant::now();

        assert_eq!(sleep(Duration::from_millis(50), Some(&token)).await, Ok(()));
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_without_token() {
        assert!(sleep(Duration::from_millis(5), None).await.is_ok());
    }

    #[tokio::test]
    async fn test_zero_duration_ignores_cancellation() {
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(sleep(Duration::ZERO, Some(&token)).await, Ok(()));
    }

    #[tokio::test]
    async fn test_already_cancelled_fails_fast() {
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(
            sleep(Duration::from_secs(3600), Some(&token)).await,
            Err(TaskError::Cancelled)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_sleep() {
        let token = CancelToken::new();
        let remote = token.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            remote.cancel();
        });

        let start = Instant::now();
        let result = sleep(Duration::from_secs(60), Some(&token)).await;
        assert_eq!(result, Err(TaskError::Cancelled));
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancel_from_os_thread_interrupts_sleep() {
        let token = CancelToken::new();
        let remote = token.clone();

        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(10));
            remote.cancel();
        });

        let result = sleep(Duration::from_secs(3600), Some(&token)).await;
        assert_eq!(result, Err(TaskError::Cancelled));
        handle.join().unwrap();
    }
}
