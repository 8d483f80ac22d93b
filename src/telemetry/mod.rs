//! Queue telemetry.
//!
//! With the `telemetry` feature enabled, [`QueueMetrics`] tracks dispatch and
//! settlement counters, the in-flight high-water mark and a latency
//! histogram, and [`JsonExporter`] writes snapshots to disk. Without it the
//! same API compiles to no-ops.

#[cfg(feature = "telemetry")]
pub mod metrics;

#[cfg(feature = "telemetry")]
pub mod export;

#[cfg(feature = "telemetry")]
pub use metrics::{MetricsSnapshot, QueueMetrics};

#[cfg(feature = "telemetry")]
pub use export::{JsonExporter, MetricsExporter};

// Stub implementations when telemetry is disabled
#[cfg(not(feature = "telemetry"))]
pub mod metrics {
    use crate::queue::TaskStatus;
    use std::time::{Duration, Instant};

    #[derive(Debug, Default)]
    pub struct QueueMetrics;

    impl QueueMetrics {
        pub fn new() -> Self {
            Self
        }
        pub fn record_dispatch(&self) {}
        pub fn record_settle(&self, _: TaskStatus, _: Duration) {}
        pub fn record_skipped(&self) {}
        pub fn record_panic(&self) {}
        pub fn in_flight(&self) -> usize {
            0
        }
        pub fn peak_in_flight(&self) -> usize {
            0
        }
        pub fn snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot::default()
        }
        pub fn reset(&self) {}
    }

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

    impl Default for MetricsSnapshot {
        fn default() -> Self {
            Self {
                timestamp: Instant::now(),
                uptime: Duration::ZERO,
                tasks_dispatched: 0,
                tasks_fulfilled: 0,
                tasks_rejected: 0,
                tasks_cancelled: 0,
                tasks_panicked: 0,
                in_flight: 0,
                peak_in_flight: 0,
                latency_samples: 0,
                avg_latency_ns: 0,
                p50_latency_ns: 0,
                p99_latency_ns: 0,
                max_latency_ns: 0,
            }
        }
    }

    impl MetricsSnapshot {
        pub fn tasks_settled(&self) -> u64 {
            0
        }
        pub fn success_rate(&self) -> f64 {
            0.0
        }
        pub fn tasks_per_second(&self) -> f64 {
            0.0
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_stub_snapshot_is_empty() {
            let metrics = QueueMetrics::new();
            metrics.record_dispatch();
            metrics.record_settle(TaskStatus::Fulfilled, Duration::from_micros(3));

            let snapshot = metrics.snapshot();
            assert_eq!(snapshot.tasks_settled(), 0);
            assert_eq!(snapshot.latency_samples, 0);
            assert_eq!(snapshot.success_rate(), 0.0);
            assert_eq!(snapshot.tasks_per_second(), 0.0);
            assert!(snapshot.timestamp <= Instant::now());
        }
    }
}

#[cfg(not(feature = "telemetry"))]
pub use metrics::{MetricsSnapshot, QueueMetrics};
