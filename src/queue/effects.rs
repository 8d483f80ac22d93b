//! Lifecycle callbacks and events emitted by a running queue.

use super::TaskStatus;
use std::fmt;

type Callback = Box<dyn FnMut(usize) + Send>;

/// Optional callbacks keyed by dispatch position.
///
/// `position` counts dispatches (0, 1, 2, ...) and is unrelated to the
/// task's submission index.
#[derive(Default)]
pub struct Effects {
    on_start: Option<Callback>,
    on_complete: Option<Callback>,
    on_cancel: Option<Callback>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired synchronously when a task is dispatched.
    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Fired after a task settles and a replacement was dispatched, unless
    /// the queue was cancelled at settlement time.
    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Fired when a task's work succeeded after cancellation was requested.
    pub fn on_cancel<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.on_cancel = Some(Box::new(f));
        self
    }

    pub(crate) fn start(&mut self, position: usize) {
        if let Some(cb) = self.on_start.as_mut() {
            cb(position);
        }
    }

    pub(crate) fn complete(&mut self, position: usize) {
        if let Some(cb) = self.on_complete.as_mut() {
            cb(position);
        }
    }

    pub(crate) fn cancel(&mut self, position: usize) {
        if let Some(cb) = self.on_cancel.as_mut() {
            cb(position);
        }
    }
}

impl fmt::Debug for Effects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effects")
            .field("on_start", &self.on_start.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// Event published to every [`subscribe`](super::ParallelQueue::subscribe)r.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent {
    Started {
        index: usize,
        position: usize,
    },
    Settled {
        index: usize,
        position: usize,
        status: TaskStatus,
    },
    Finished {
        cancelled: bool,
    },
}
