//! Signature polling
//!
//! A periodic task refreshes guardian signatures and the deadline from the
//! signature/deadline source and merges each result into the shared record.
//! A failed fetch is logged and retried on the next tick; it never touches
//! the record, so a bad poll cannot clear signatures that were already
//! collected. The task is owned by the session: dropping the handle aborts
//! it, so a torn-down view can never write to a disposed record.

use crate::record::RecoveryRecord;
use crate::status::StatusHandle;
use rescue_core::effects::RecoveryStoreEffects;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info};

/// Configuration for the signature poller
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Cadence between fetches
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
        }
    }
}

/// Periodic refresh of one record from the signature/deadline source
pub struct SignaturePoller<E> {
    effects: Arc<E>,
    record: Arc<RwLock<RecoveryRecord>>,
    status: StatusHandle,
    config: PollerConfig,
}

impl<E> SignaturePoller<E>
where
    E: RecoveryStoreEffects + 'static,
{
    /// Create a poller with the default 3-second cadence
    pub fn new(effects: Arc<E>, record: Arc<RwLock<RecoveryRecord>>, status: StatusHandle) -> Self {
        Self {
            effects,
            record,
            status,
            config: PollerConfig::default(),
        }
    }

    /// Override the polling cadence
    pub fn with_config(mut self, config: PollerConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the polling task
    ///
    /// The first fetch fires immediately, then one per configured interval.
    pub fn spawn(self) -> PollerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let identifier = self.record.read().await.identifier.clone();
            info!(recovery = %identifier, "signature polling started");
            let mut ticker = interval(self.config.interval);
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => self.poll_once().await,
                }
            }
            debug!(recovery = %identifier, "signature polling stopped");
        });
        PollerHandle {
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }

    /// One fetch-and-merge cycle
    async fn poll_once(&self) {
        let identifier = self.record.read().await.identifier.clone();
        match self.effects.fetch_recovery(&identifier).await {
            Ok(update) => {
                let mut record = self.record.write().await;
                record.apply_update(update);
                let snapshot = record.clone();
                drop(record);
                self.status.refresh_quorum(&snapshot);
            }
            Err(err) => {
                // retried at the next tick; the record stays as-is
                debug!(recovery = %identifier, error = %err, "signature poll failed");
            }
        }
    }
}

/// Owner handle for a running poller
///
/// `shutdown()` stops the task cleanly; dropping the handle aborts it.
/// Either way, no further merges happen after the handle is gone.
#[derive(Debug)]
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stop the polling task and wait for it to exit
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Whether the polling task has already exited
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}
