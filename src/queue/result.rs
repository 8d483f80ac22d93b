use crate::error::TaskError;

/// Aggregate returned by [`ParallelQueue::execute`](super::ParallelQueue::execute).
///
/// `fulfilled` and `rejected` are in settlement order. `results` is the only
/// field indexed by submission order; use it when outcomes must be matched
/// back to their tasks. Tasks that were never dispatched because the queue
/// was cancelled appear only in `results`, as [`TaskError::Cancelled`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueResult<T> {
    pub cancelled: bool,
    pub fulfilled: Vec<T>,
    pub rejected: Vec<TaskError>,
    pub results: Vec<Result<T, TaskError>>,
}

impl<T> QueueResult<T> {
    /// Number of submitted tasks.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True when the queue ran to completion and every task succeeded.
    pub fn all_fulfilled(&self) -> bool {
        !self.cancelled && self.results.iter().all(Result::is_ok)
    }

    /// Number of slots holding a cancellation, dispatched or not.
    pub fn cancelled_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, Err(TaskError::Cancelled)))
            .count()
    }

    /// Submission-ordered values, or the first failure by submission index.
    pub fn into_values(self) -> Result<Vec<T>, TaskError> {
        self.results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(cancelled: bool, results: Vec<Result<u32, TaskError>>) -> QueueResult<u32> {
        QueueResult {
            cancelled,
            fulfilled: results.iter().filter_map(|r| r.clone().ok()).collect(),
            rejected: results.iter().filter_map(|r| r.clone().err()).collect(),
            results,
        }
    }

    #[test]
    fn test_all_fulfilled() {
        let result = sample(false, vec![Ok(1), Ok(2)]);
        assert_eq!(result.len(), 2);
        assert!(result.all_fulfilled());
        assert_eq!(result.into_values(), Ok(vec![1, 2]));
    }

    #[test]
    fn test_failures_and_cancellations() {
        let result = sample(
            true,
            vec![
                Ok(1),
                Err(TaskError::failed("wall")),
                Err(TaskError::Cancelled),
                Err(TaskError::Cancelled),
            ],
        );

        assert!(!result.all_fulfilled());
        assert_eq!(result.cancelled_count(), 2);
        assert_eq!(result.into_values(), Err(TaskError::failed("wall")));
    }

    #[test]
    fn test_empty() {
        let result = sample(false, Vec::new());
        assert!(result.is_empty());
        assert!(result.all_fulfilled());
    }
}
