pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("pop on empty heap")]
    EmptyHeap,

    #[error("invalid concurrency: {0} (must be >= 1)")]
    InvalidConcurrency(usize),

    #[error("config error: {0}")]
    Config(String),

    #[error("registry not initialized")]
    NotInitialized,

    #[error("already initialized")]
    AlreadyInitialized,

    #[cfg(feature = "telemetry")]
    #[error("telemetry error: {0}")]
    Telemetry(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    #[cfg(feature = "telemetry")]
    pub fn telemetry<S: Into<String>>(msg: S) -> Self {
        Error::Telemetry(msg.into())
    }
}

/// Failure recorded in a single task's result slot.
///
/// Never escapes `ParallelQueue::execute` as a global error; it only shows up
/// in `QueueResult::rejected` and `QueueResult::results`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("cancelled")]
    Cancelled,

    #[error("task failed: {0}")]
    Failed(String),

    #[error("task panicked: {0}")]
    Panicked(String),
}

impl TaskError {
    pub fn failed<M: std::fmt::Display>(msg: M) -> Self {
        TaskError::Failed(msg.to_string())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TaskError::Cancelled)
    }
}
