//! Bounded-concurrency execution of task factories.

use super::effects::{Effects, QueueEvent};
use super::panic::isolate;
use super::result::QueueResult;
use super::task::{TaskFactory, TaskFuture, TaskStatus};
use crate::cancel::CancelToken;
use crate::config::QueueConfig;
use crate::error::{Result, TaskError};
use crate::telemetry::QueueMetrics;
use async_channel::{Receiver, Sender};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Cancel-only handle to a queue, usable while the queue itself is moved
/// into [`ParallelQueue::execute`].
#[derive(Debug, Clone)]
pub struct QueueHandle {
    token: CancelToken,
}

impl QueueHandle {
    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!("queue cancellation requested");
        }
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

struct Settled<T> {
    index: usize,
    position: usize,
    dispatched_at: Instant,
    outcome: std::result::Result<T, TaskError>,
}

type InFlight<T> = FuturesUnordered<BoxFuture<'static, Settled<T>>>;

/// Runs task factories with at most `max_parallel` of them in flight.
///
/// Tasks start in submission order; each settlement immediately makes room
/// for the next pending task. All in-flight futures are polled by the future
/// returned from [`execute`](Self::execute) itself, so nothing is spawned and
/// any executor can drive the queue.
///
/// Cancellation is cooperative: after [`cancel`](Self::cancel) no new task is
/// dispatched, running tasks are expected to watch their [`CancelToken`], and
/// a task that still succeeds is recorded as [`TaskError::Cancelled`].
///
/// `T: Clone` because each value is reported twice: once in settlement order
/// in [`QueueResult::fulfilled`] and once by submission index in
/// [`QueueResult::results`]. Wrap non-`Clone` payloads in an `Arc`.
///
/// ```
/// use parq::queue::{task, ParallelQueue};
///
/// let tasks = (0..5).map(|i| task(move |_| async move { Ok(i) }));
/// let queue = ParallelQueue::new(2, tasks).unwrap();
///
/// let result = futures::executor::block_on(queue.execute());
/// assert_eq!(result.into_values().unwrap(), vec![0, 1, 2, 3, 4]);
/// ```
pub struct ParallelQueue<T> {
    config: QueueConfig,
    pending: VecDeque<(usize, TaskFactory<T>)>,
    results: Vec<Option<std::result::Result<T, TaskError>>>,
    settle_order: Vec<usize>,
    started: usize,
    token: CancelToken,
    effects: Effects,
    subscribers: Vec<Sender<QueueEvent>>,
    metrics: Option<Arc<QueueMetrics>>,
}

impl<T> ParallelQueue<T>
where
    T: Clone + Send + 'static,
{
    /// Create a queue running at most `max_parallel` tasks at once.
    ///
    /// Fails with [`Error::InvalidConcurrency`](crate::Error::InvalidConcurrency)
    /// when `max_parallel` is zero.
    pub fn new<I>(max_parallel: usize, factories: I) -> Result<Self>
    where
        I: IntoIterator<Item = TaskFactory<T>>,
    {
        let config = QueueConfig {
            max_parallel,
            ..QueueConfig::default()
        };
        Self::with_config(config, factories)
    }

    pub fn with_config<I>(config: QueueConfig, factories: I) -> Result<Self>
    where
        I: IntoIterator<Item = TaskFactory<T>>,
    {
        config.validate()?;

        let pending: VecDeque<_> = factories.into_iter().enumerate().collect();
        let mut results = Vec::with_capacity(pending.len());
        results.resize_with(pending.len(), || None);

        Ok(Self {
            config,
            settle_order: Vec::with_capacity(pending.len()),
            pending,
            results,
            started: 0,
            token: CancelToken::new(),
            effects: Effects::default(),
            subscribers: Vec::new(),
            metrics: None,
        })
    }

    pub fn with_effects(mut self, effects: Effects) -> Self {
        self.effects = effects;
        self
    }

    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.effects = self.effects.on_start(f);
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.effects = self.effects.on_complete(f);
        self
    }

    pub fn on_cancel<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.effects = self.effects.on_cancel(f);
        self
    }

    /// Use an externally owned token instead of a fresh one, e.g. to stop
    /// several queues with one signal.
    pub fn with_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<QueueMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Receive [`QueueEvent`]s for this queue. The channel is unbounded and
    /// closes when `execute` returns.
    pub fn subscribe(&mut self) -> Receiver<QueueEvent> {
        let (tx, rx) = async_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn handle(&self) -> QueueHandle {
        QueueHandle {
            token: self.token.clone(),
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.handle().cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Number of submitted tasks.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn max_parallel(&self) -> usize {
        self.config.max_parallel
    }

    /// Run every task and collect the outcome. Never fails: task failures and
    /// cancellation are reported through the returned [`QueueResult`].
    pub async fn execute(self) -> QueueResult<T> {
        let span = tracing::debug_span!(
            "parallel_queue",
            name = %self.config.name,
            tasks = self.results.len(),
            max_parallel = self.config.max_parallel,
        );
        self.run().instrument(span).await
    }

    async fn run(mut self) -> QueueResult<T> {
        let mut in_flight = FuturesUnordered::new();

        while in_flight.len() < self.config.max_parallel && self.dispatch_next(&mut in_flight) {}

        while let Some(settled) = in_flight.next().await {
            self.settle(settled, &mut in_flight);
        }

        self.finish()
    }

    fn dispatch_next(&mut self, in_flight: &mut InFlight<T>) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        let Some((index, factory)) = self.pending.pop_front() else {
            return false;
        };

        let position = self.started;
        self.started += 1;

        self.effects.start(position);
        self.emit(QueueEvent::Started { index, position });
        if let Some(metrics) = &self.metrics {
            metrics.record_dispatch();
        }
        tracing::trace!(index, position, in_flight = in_flight.len() + 1, "dispatching task");

        let fut: TaskFuture<T> = if self.config.catch_panics {
            isolate(factory, self.token.clone())
        } else {
            factory(self.token.clone())
        };
        let dispatched_at = Instant::now();

        in_flight.push(
            async move {
                Settled {
                    index,
                    position,
                    dispatched_at,
                    outcome: fut.await,
                }
            }
            .boxed(),
        );
        true
    }

    fn settle(&mut self, settled: Settled<T>, in_flight: &mut InFlight<T>) {
        let Settled {
            index,
            position,
            dispatched_at,
            outcome,
        } = settled;
        let cancelled = self.token.is_cancelled();

        let (slot, status) = match outcome {
            Ok(_) if cancelled => {
                tracing::debug!(index, position, "discarding success after cancellation");
                self.effects.cancel(position);
                (Err(TaskError::Cancelled), TaskStatus::Cancelled)
            }
            Ok(value) => (Ok(value), TaskStatus::Fulfilled),
            Err(err) => {
                if let TaskError::Panicked(msg) = &err {
                    tracing::warn!(index, position, panic = %msg, "task panicked");
                    if let Some(metrics) = &self.metrics {
                        metrics.record_panic();
                    }
                } else {
                    tracing::debug!(index, position, error = %err, "task rejected");
                }
                (Err(err), TaskStatus::Rejected)
            }
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_settle(status, dispatched_at.elapsed());
        }
        tracing::trace!(index, position, ?status, "task settled");
        self.emit(QueueEvent::Settled {
            index,
            position,
            status,
        });

        debug_assert!(self.results[index].is_none(), "slot {} written twice", index);
        self.results[index] = Some(slot);
        self.settle_order.push(index);

        if !cancelled {
            self.dispatch_next(in_flight);
            self.effects.complete(position);
        }
    }

    fn finish(self) -> QueueResult<T> {
        let cancelled = self.token.is_cancelled();

        if !self.pending.is_empty() {
            tracing::debug!(skipped = self.pending.len(), "tasks never dispatched");
            if let Some(metrics) = &self.metrics {
                for _ in 0..self.pending.len() {
                    metrics.record_skipped();
                }
            }
        }

        let results: Vec<_> = self
            .results
            .into_iter()
            .map(|slot| slot.unwrap_or(Err(TaskError::Cancelled)))
            .collect();

        let mut fulfilled = Vec::new();
        let mut rejected = Vec::new();
        for index in self.settle_order {
            match &results[index] {
                Ok(value) => fulfilled.push(value.clone()),
                Err(err) => rejected.push(err.clone()),
            }
        }

        for tx in &self.subscribers {
            let _ = tx.try_send(QueueEvent::Finished { cancelled });
        }
        tracing::debug!(
            cancelled,
            fulfilled = fulfilled.len(),
            rejected = rejected.len(),
            "queue finished"
        );

        QueueResult {
            cancelled,
            fulfilled,
            rejected,
            results,
        }
    }

    fn emit(&self, event: QueueEvent) {
        for tx in &self.subscribers {
            // Closed receivers just stop listening.
            let _ = tx.try_send(event.clone());
        }
    }
}

impl<T> fmt::Debug for ParallelQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelQueue")
            .field("name", &self.config.name)
            .field("max_parallel", &self.config.max_parallel)
            .field("tasks", &self.results.len())
            .field("pending", &self.pending.len())
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}
