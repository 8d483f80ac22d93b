//! Process-wide queue defaults.
//!
//! The registry is explicit state owned by the host application: it exists
//! only between [`init`] and [`shutdown`]. Queues built with
//! [`run_parallel_queue`](crate::queue::run_parallel_queue) read their config
//! from it and share its metrics collector. When nothing is initialized,
//! [`current_config`] falls back to [`QueueConfig::default`].

use crate::config::QueueConfig;
use crate::error::{Error, Result};
use crate::telemetry::QueueMetrics;
use parking_lot::RwLock;
use std::cell::{Cell, RefCell};
use std::sync::Arc;

#[derive(Debug)]
pub struct Registry {
    config: QueueConfig,
    metrics: Arc<QueueMetrics>,
}

impl Registry {
    pub fn new(config: QueueConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            metrics: Arc::new(QueueMetrics::new()),
        })
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<QueueMetrics> {
        &self.metrics
    }
}

// Global registry for the simple API
static GLOBAL_REGISTRY: RwLock<Option<Arc<Registry>>> = RwLock::new(None);

// Thread-local registry for isolated tests
thread_local! {
    static THREAD_LOCAL_MODE: Cell<bool> = const { Cell::new(false) };
    static THREAD_REGISTRY: RefCell<Option<Arc<Registry>>> = const { RefCell::new(None) };
}

fn thread_local_mode() -> bool {
    THREAD_LOCAL_MODE.with(Cell::get)
}

pub fn init() -> Result<()> {
    init_with_config(QueueConfig::default())
}

pub fn init_with_config(config: QueueConfig) -> Result<()> {
    if thread_local_mode() {
        return install_thread_local(config);
    }

    let mut registry = GLOBAL_REGISTRY.write();
    if registry.is_some() {
        return Err(Error::AlreadyInitialized);
    }

    *registry = Some(Arc::new(Registry::new(config)?));
    tracing::debug!("queue registry initialized");
    Ok(())
}

/// Initialize a registry visible only to the calling thread (for tests)
pub fn init_thread_local() -> Result<()> {
    init_thread_local_with_config(QueueConfig::default())
}

/// Initialize a thread-local registry with config (for tests)
pub fn init_thread_local_with_config(config: QueueConfig) -> Result<()> {
    THREAD_LOCAL_MODE.with(|mode| mode.set(true));
    install_thread_local(config)
}

fn install_thread_local(config: QueueConfig) -> Result<()> {
    THREAD_REGISTRY.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_some() {
            return Err(Error::AlreadyInitialized);
        }
        *slot = Some(Arc::new(Registry::new(config)?));
        tracing::debug!("thread-local queue registry initialized");
        Ok(())
    })
}

fn current_registry() -> Option<Arc<Registry>> {
    if thread_local_mode() {
        THREAD_REGISTRY.with(|cell| cell.borrow().clone())
    } else {
        GLOBAL_REGISTRY.read().clone()
    }
}

pub fn is_initialized() -> bool {
    current_registry().is_some()
}

/// Config used for new queues: the registry's, or the default.
pub fn current_config() -> QueueConfig {
    current_registry()
        .map(|registry| registry.config().clone())
        .unwrap_or_default()
}

/// Metrics collector shared by queues built from the registry.
pub fn global_metrics() -> Result<Arc<QueueMetrics>> {
    current_registry()
        .map(|registry| registry.metrics().clone())
        .ok_or(Error::NotInitialized)
}

/// Drop the registry. Safe to call when nothing is initialized.
pub fn shutdown() {
    if thread_local_mode() {
        THREAD_REGISTRY.with(|cell| cell.borrow_mut().take());
        THREAD_LOCAL_MODE.with(|mode| mode.set(false));
    } else if GLOBAL_REGISTRY.write().take().is_some() {
        tracing::debug!("queue registry shut down");
    }
}
