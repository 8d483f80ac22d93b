//! Task factories and per-task state.

use crate::cancel::CancelToken;
use crate::error::TaskError;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;

/// Eventual outcome of a single task.
pub type TaskFuture<T> = BoxFuture<'static, Result<T, TaskError>>;

/// Boxed task factory. Invoked once, at dispatch, with the queue's token.
pub type TaskFactory<T> = Box<dyn FnOnce(CancelToken) -> TaskFuture<T> + Send>;

/// Box a closure returning a future into a [`TaskFactory`].
///
/// ```
/// use parq::queue::task;
///
/// let factory = task(|token| async move {
///     if token.is_cancelled() {
///         return Err(parq::TaskError::Cancelled);
///     }
///     Ok(21 * 2)
/// });
/// # let _ = factory;
/// ```
pub fn task<T, F, Fut>(f: F) -> TaskFactory<T>
where
    F: FnOnce(CancelToken) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
{
    Box::new(move |token| f(token).boxed())
}

/// Lifecycle of a queued task.
///
/// `Pending -> Running -> {Fulfilled, Rejected, Cancelled}`. `Cancelled` is
/// only reached when a task's work succeeded after the queue was cancelled;
/// a task failing on its own is `Rejected` whatever the cancellation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Pending,
    Running,
    Fulfilled,
    Rejected,
    Cancelled,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskStatus::Fulfilled | TaskStatus::Rejected | TaskStatus::Cancelled
        )
    }
}
