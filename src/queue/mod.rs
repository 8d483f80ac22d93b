//! Parallel task queue with cooperative cancellation.
//!
//! A [`ParallelQueue`] takes a list of [`TaskFactory`]s, keeps up to
//! `max_parallel` of them running, and returns a [`QueueResult`] once all of
//! them have settled or cancellation has stopped further dispatch.

pub mod effects;
pub mod parallel;
pub(crate) mod panic;
pub mod result;
pub mod runner;
pub mod task;

pub use effects::{Effects, QueueEvent};
pub use parallel::{ParallelQueue, QueueHandle};
pub use result::QueueResult;
pub use runner::{run_parallel_queue, QueueRunner, RunOptions};
pub use task::{task, TaskFactory, TaskFuture, TaskStatus};
