//! Panic isolation for task factories.

use super::task::{TaskFactory, TaskFuture};
use crate::cancel::CancelToken;
use crate::error::TaskError;
use futures::future::{self, FutureExt};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Invoke `factory` and turn any panic, whether raised while building the
/// future or while polling it, into [`TaskError::Panicked`].
pub(crate) fn isolate<T>(factory: TaskFactory<T>, token: CancelToken) -> TaskFuture<T>
where
    T: Send + 'static,
{
    match catch_unwind(AssertUnwindSafe(move || factory(token))) {
        Ok(fut) => AssertUnwindSafe(fut)
            .catch_unwind()
            .map(|outcome| match outcome {
                Ok(result) => result,
                Err(payload) => Err(TaskError::Panicked(panic_message(payload.as_ref()))),
            })
            .boxed(),
        Err(payload) => {
            future::ready(Err(TaskError::Panicked(panic_message(payload.as_ref())))).boxed()
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
