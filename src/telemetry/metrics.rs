//! Counters and latency tracking for parallel queues.

use crate::queue::TaskStatus;
use hdrhistogram::Histogram;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Queue metrics collector.
///
/// Shared behind an `Arc` so one collector can aggregate several queues; the
/// in-flight gauge is then the sum over all of them.
#[derive(Debug)]
pub struct QueueMetrics {
    tasks_dispatched: AtomicU64,
    tasks_fulfilled: AtomicU64,
    tasks_rejected: AtomicU64,
    tasks_cancelled: AtomicU64,
    tasks_panicked: AtomicU64,

    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,

    // Dispatch-to-settle latency
    latency_histogram: RwLock<Histogram<u64>>,

    start_time: RwLock<Instant>,
}

impl QueueMetrics {
    pub fn new() -> Self {
        Self {
            tasks_dispatched: AtomicU64::new(0),
            tasks_fulfilled: AtomicU64::new(0),
            tasks_rejected: AtomicU64::new(0),
            tasks_cancelled: AtomicU64::new(0),
            tasks_panicked: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            latency_histogram: RwLock::new(
                Histogram::new(3).expect("Failed to create histogram"),
            ),
            start_time: RwLock::new(Instant::now()),
        }
    }

    /// Record a task leaving the pending list.
    pub fn record_dispatch(&self) {
        self.tasks_dispatched.fetch_add(1, Ordering::Relaxed);
        let now = self.in_flight.fetch_add(1, Ordering::AcqRel) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::AcqRel);
    }

    /// Record a task reaching a terminal state after `elapsed` in flight.
    pub fn record_settle(&self, status: TaskStatus, elapsed: Duration) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);

        let counter = match status {
            TaskStatus::Fulfilled => &self.tasks_fulfilled,
            TaskStatus::Rejected => &self.tasks_rejected,
            TaskStatus::Cancelled => &self.tasks_cancelled,
            TaskStatus::Pending | TaskStatus::Running => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        if let Err(e) = self.latency_histogram.write().record(nanos) {
            tracing::warn!(nanos, error = %e, "latency sample not recorded");
        }
    }

    /// Record a task that was never dispatched because the queue was cancelled.
    pub fn record_skipped(&self) {
        self.tasks_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_panic(&self) {
        self.tasks_panicked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let histogram = self.latency_histogram.read();

        MetricsSnapshot {
            timestamp: Instant::now(),
            uptime: self.start_time.read().elapsed(),
            tasks_dispatched: self.tasks_dispatched.load(Ordering::Relaxed),
            tasks_fulfilled: self.tasks_fulfilled.load(Ordering::Relaxed),
            tasks_rejected: self.tasks_rejected.load(Ordering::Relaxed),
            tasks_cancelled: self.tasks_cancelled.load(Ordering::Relaxed),
            tasks_panicked: self.tasks_panicked.load(Ordering::Relaxed),
            in_flight: self.in_flight(),
            peak_in_flight: self.peak_in_flight(),
            latency_samples: histogram.len(),
            avg_latency_ns: if histogram.len() > 0 {
                histogram.mean() as u64
            } else {
                0
            },
            p50_latency_ns: histogram.value_at_quantile(0.50),
            p99_latency_ns: histogram.value_at_quantile(0.99),
            max_latency_ns: histogram.max(),
        }
    }

    /// Reset all counters. The in-flight gauge is left alone since tasks may
    /// still be running.
    pub fn reset(&self) {
        self.tasks_dispatched.store(0, Ordering::Relaxed);
        self.tasks_fulfilled.store(0, Ordering::Relaxed);
        self.tasks_rejected.store(0, Ordering::Relaxed);
        self.tasks_cancelled.store(0, Ordering::Relaxed);
        self.tasks_panicked.store(0, Ordering::Relaxed);
        self.peak_in_flight.store(self.in_flight(), Ordering::Relaxed);
        *self.start_time.write() = Instant::now();

        self.latency_histogram.write().reset();
    }
}

impl Default for QueueMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of queue metrics at a point in time
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub timestamp: Instant,
    pub uptime: Duration,
    pub tasks_dispatched: u64,
    pub tasks_fulfilled: u64,
    pub tasks_rejected: u64,
    pub tasks_cancelled: u64,
    pub tasks_panicked: u64,
    pub in_flight: usize,
    pub peak_in_flight: usize,
    pub latency_samples: u64,
    pub avg_latency_ns: u64,
    pub p50_latency_ns: u64,
    pub p99_latency_ns: u64,
    pub max_latency_ns: u64,
}

impl MetricsSnapshot {
    pub fn tasks_settled(&self) -> u64 {
        self.tasks_fulfilled + self.tasks_rejected + self.tasks_cancelled
    }

    /// Fraction of settled tasks that were fulfilled (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        let settled = self.tasks_settled();
        if settled == 0 {
            return 0.0;
        }
        self.tasks_fulfilled as f64 / settled as f64
    }

    pub fn tasks_per_second(&self) -> f64 {
        let seconds = self.uptime.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.tasks_settled() as f64 / seconds
    }
}
