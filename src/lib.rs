//! PARQ - Parallel Async Run Queue
//!
//! Bounded-concurrency execution of async task factories with cooperative
//! cancellation, plus the comparator-driven min-heap that search routines
//! feed from.
//!
//! # Quick Start
//!
//! ```
//! use parq::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> parq::Result<()> {
//! let tasks: Vec<TaskFactory<u64>> = (0..6u64)
//!     .map(|i| {
//!         task(move |token: CancelToken| async move {
//!             parq::cancel::sleep(Duration::from_millis(i), Some(&token)).await?;
//!             Ok(i * i)
//!         })
//!     })
//!     .collect();
//!
//! let queue = ParallelQueue::new(2, tasks)?;
//! let handle = queue.handle(); // cancel from anywhere with handle.cancel()
//! let result = queue.execute().await;
//!
//! assert!(!handle.is_cancelled());
//! assert_eq!(result.into_values().unwrap(), vec![0, 1, 4, 9, 16, 25]);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Bounded concurrency**: at most `max_parallel` tasks in flight, started
//!   in submission order
//! - **Cooperative cancellation**: one shared [`CancelToken`] per queue; no
//!   new dispatch after cancel, late successes recorded as cancelled
//! - **Failure isolation**: task errors and panics stay in their own slot
//! - **Lifecycle hooks**: `on_start` / `on_complete` / `on_cancel` callbacks
//!   and an event channel
//! - **Min-heap**: [`MinHeap`] with caller-supplied ordering
//! - **Telemetry**: queue counters and latency histogram (optional)

// Lint configuration
#![warn(missing_debug_implementations)]

pub mod cancel;
pub mod config;
pub mod error;
pub mod heap;
pub mod prelude;
pub mod queue;
pub mod runtime;
pub mod telemetry;

// Re-export key types at crate root
pub use cancel::CancelToken;
pub use config::{QueueConfig, QueueConfigBuilder};
pub use error::{Error, Result, TaskError};
pub use heap::MinHeap;
pub use queue::{run_parallel_queue, ParallelQueue, QueueResult};
pub use runtime::{init, init_with_config, shutdown};
