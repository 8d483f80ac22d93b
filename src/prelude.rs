pub use crate::cancel::{sleep, CancelToken};
pub use crate::config::{QueueConfig, QueueConfigBuilder};
pub use crate::error::{Error, Result, TaskError};
pub use crate::heap::{Keyed, MinHeap};
pub use crate::queue::{
    run_parallel_queue, task, Effects, ParallelQueue, QueueEvent, QueueHandle, QueueResult,
    RunOptions, TaskFactory, TaskStatus,
};
pub use crate::telemetry::{MetricsSnapshot, QueueMetrics};
pub use crate::{init, init_with_config, shutdown};

#[cfg(feature = "telemetry")]
pub use crate::telemetry::{JsonExporter, MetricsExporter};
