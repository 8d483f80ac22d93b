//! Metrics export functionality.

use super::metrics::MetricsSnapshot;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Trait for exporting metrics to different sinks
pub trait MetricsExporter: Send + Sync {
    fn export(&self, snapshot: &MetricsSnapshot) -> Result<()>;
}

/// Write metrics snapshots as pretty-printed JSON documents
#[derive(Debug)]
pub struct JsonExporter {
    output_path: PathBuf,
}

impl JsonExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn to_json(snapshot: &MetricsSnapshot) -> Result<String> {
        serde_json::to_string_pretty(&SerializableSnapshot::from(snapshot))
            .map_err(|e| Error::telemetry(format!("JSON serialization failed: {}", e)))
    }
}

impl MetricsExporter for JsonExporter {
    fn export(&self, snapshot: &MetricsSnapshot) -> Result<()> {
        let json = Self::to_json(snapshot)?;
        std::fs::write(&self.output_path, json)?;
        tracing::debug!(path = %self.output_path.display(), "exported queue metrics");
        Ok(())
    }
}

#[derive(Debug, Clone, serde::Serialize)]
struct SerializableSnapshot {
    uptime_secs: f64,
    tasks_dispatched: u64,
    tasks_fulfilled: u64,
    tasks_rejected: u64,
    tasks_cancelled: u64,
    tasks_panicked: u64,
    in_flight: usize,
    peak_in_flight: usize,
    latency_samples: u64,
    avg_latency_us: f64,
    p50_latency_us: f64,
    p99_latency_us: f64,
    max_latency_us: f64,
    success_rate: f64,
    tasks_per_second: f64,
}

impl From<&MetricsSnapshot> for SerializableSnapshot {
    fn from(snapshot: &MetricsSnapshot) -> Self {
        Self {
            uptime_secs: snapshot.uptime.as_secs_f64(),
            tasks_dispatched: snapshot.tasks_dispatched,
            tasks_fulfilled: snapshot.tasks_fulfilled,
            tasks_rejected: snapshot.tasks_rejected,
            tasks_cancelled: snapshot.tasks_cancelled,
            tasks_panicked: snapshot.tasks_panicked,
            in_flight: snapshot.in_flight,
            peak_in_flight: snapshot.peak_in_flight,
            latency_samples: snapshot.latency_samples,
            avg_latency_us: snapshot.avg_latency_ns as f64 / 1_000.0,
            p50_latency_us: snapshot.p50_latency_ns as f64 / 1_000.0,
            p99_latency_us: snapshot.p99_latency_ns as f64 / 1_000.0,
            max_latency_us: snapshot.max_latency_ns as f64 / 1_000.0,
            success_rate: snapshot.success_rate(),
            tasks_per_second: snapshot.tasks_per_second(),
        }
    }
}
