use crate::error::{Error, Result};

/// Default number of tasks kept in flight.
pub const DEFAULT_MAX_PARALLEL: usize = 3;

const MAX_PARALLEL_LIMIT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    pub max_parallel: usize,
    pub name: String,

    /// Catch panics raised by task factories and record them as
    /// `TaskError::Panicked`. When disabled the panic unwinds out of
    /// `execute`.
    pub catch_panics: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_parallel: DEFAULT_MAX_PARALLEL,
            name: "parq-queue".to_string(),
            catch_panics: true,
        }
    }
}

impl QueueConfig {
    pub fn builder() -> QueueConfigBuilder {
        QueueConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_parallel == 0 {
            return Err(Error::InvalidConcurrency(0));
        }
        if self.max_parallel > MAX_PARALLEL_LIMIT {
            return Err(Error::config(format!(
                "max_parallel too large (max {})",
                MAX_PARALLEL_LIMIT
            )));
        }

        if self.name.trim().is_empty() {
            return Err(Error::config("name must not be empty"));
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct QueueConfigBuilder {
    config: QueueConfig,
}

impl QueueConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: QueueConfig::default(),
        }
    }

    pub fn max_parallel(mut self, n: usize) -> Self {
        self.config.max_parallel = n;
        self
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn catch_panics(mut self, catch: bool) -> Self {
        self.config.catch_panics = catch;
        self
    }

    pub fn build(self) -> Result<QueueConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QueueConfig::default();
        assert_eq!(config.max_parallel, 3);
        assert!(config.catch_panics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = QueueConfig::builder()
            .max_parallel(8)
            .name("trails")
            .catch_panics(false)
            .build()
            .unwrap();

        assert_eq!(config.max_parallel, 8);
        assert_eq!(config.name, "trails");
        assert!(!config.catch_panics);
    }

    #[test]
    fn test_zero_parallel_rejected() {
        let err = QueueConfig::builder().max_parallel(0).build().unwrap_err();
        assert!(matches!(err, Error::InvalidConcurrency(0)));
    }

    #[test]
    fn test_limits() {
        assert!(QueueConfig::builder().max_parallel(4096).build().is_err());
        assert!(QueueConfig::builder().name("  ").build().is_err());
    }
}
