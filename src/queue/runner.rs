//! One-call setup for the common "run these, maybe stop them" case.

use super::effects::{Effects, QueueEvent};
use super::parallel::{ParallelQueue, QueueHandle};
use super::result::QueueResult;
use super::task::TaskFactory;
use crate::error::Result;
use crate::runtime;
use async_channel::Receiver;

/// Options for [`run_parallel_queue`].
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Tasks kept in flight; defaults to the registry's `max_parallel`.
    pub parallel: Option<usize>,
    pub effects: Effects,
}

impl RunOptions {
    pub fn parallel(mut self, n: usize) -> Self {
        self.parallel = Some(n);
        self
    }

    pub fn effects(mut self, effects: Effects) -> Self {
        self.effects = effects;
        self
    }
}

/// A configured queue paired with its cancel handle.
#[derive(Debug)]
pub struct QueueRunner<T> {
    queue: ParallelQueue<T>,
    handle: QueueHandle,
}

impl<T> QueueRunner<T>
where
    T: Clone + Send + 'static,
{
    pub fn cancel(&self) {
        self.handle.cancel();
    }

    pub fn handle(&self) -> QueueHandle {
        self.handle.clone()
    }

    pub fn subscribe(&mut self) -> Receiver<QueueEvent> {
        self.queue.subscribe()
    }

    pub async fn run(self) -> QueueResult<T> {
        self.queue.execute().await
    }
}

/// Build a queue from the process-wide defaults (see [`crate::runtime`]),
/// overridden by `options`.
///
/// When the registry is initialized its shared metrics collector is attached
/// to the queue.
pub fn run_parallel_queue<T, I>(factories: I, options: RunOptions) -> Result<QueueRunner<T>>
where
    T: Clone + Send + 'static,
    I: IntoIterator<Item = TaskFactory<T>>,
{
    let mut config = runtime::current_config();
    if let Some(parallel) = options.parallel {
        config.max_parallel = parallel;
    }

    let mut queue = ParallelQueue::with_config(config, factories)?.with_effects(options.effects);
    if let Ok(metrics) = runtime::global_metrics() {
        queue = queue.with_metrics(metrics);
    }

    let handle = queue.handle();
    Ok(QueueRunner { queue, handle })
}
