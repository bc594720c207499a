//! Session wiring
//!
//! A [`RecoverySession`] owns everything a recovery view needs: the shared
//! record, the polling task, the status channel, and the executor. The
//! polling task lives exactly as long as the session; shutting down (or
//! dropping) the session guarantees no further merges into the record.

use crate::executor::RecoveryExecutor;
use crate::link::rescue_link;
use crate::poller::{PollerConfig, PollerHandle, SignaturePoller};
use crate::record::RecoveryRecord;
use crate::status::{RecoveryStatus, StatusHandle};
use rescue_core::{RecoveryId, Result, TxReceipt};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// One live recovery view: record, poller, status, executor
pub struct RecoverySession<E> {
    identifier: RecoveryId,
    record: Arc<RwLock<RecoveryRecord>>,
    executor: RecoveryExecutor<E>,
    poller: PollerHandle,
    status_rx: watch::Receiver<RecoveryStatus>,
}

impl<E> RecoverySession<E>
where
    E: crate::effects::RescueEffects + 'static,
{
    /// Start a session with the default 3-second polling cadence
    pub fn start(effects: Arc<E>, record: RecoveryRecord) -> Self {
        Self::start_with_config(effects, record, PollerConfig::default())
    }

    /// Start a session with an explicit polling cadence
    pub fn start_with_config(
        effects: Arc<E>,
        record: RecoveryRecord,
        config: PollerConfig,
    ) -> Self {
        let identifier = record.identifier.clone();
        let (status, status_rx) = StatusHandle::channel(&record);
        let record = Arc::new(RwLock::new(record));

        let poller = SignaturePoller::new(effects.clone(), record.clone(), status.clone())
            .with_config(config)
            .spawn();
        let executor = RecoveryExecutor::new(effects, record.clone(), status);

        Self {
            identifier,
            record,
            executor,
            poller,
            status_rx,
        }
    }

    /// The identifier this session polls by
    pub fn identifier(&self) -> &RecoveryId {
        &self.identifier
    }

    /// Shareable link resolving back to this session's record
    pub fn rescue_link(&self, base: &str) -> String {
        rescue_link(base, &self.identifier)
    }

    /// Watch the session status
    pub fn status(&self) -> watch::Receiver<RecoveryStatus> {
        self.status_rx.clone()
    }

    /// Clone the current record state
    pub async fn record(&self) -> RecoveryRecord {
        self.record.read().await.clone()
    }

    /// Trigger the recovery submission (see [`RecoveryExecutor::execute`])
    pub async fn execute(&self) -> Result<TxReceipt> {
        self.executor.execute().await
    }

    /// Mark the session terminally failed
    pub fn abandon(&self, reason: impl Into<String>) -> Result<()> {
        self.executor.abandon(reason)
    }

    /// Stop polling and tear the session down cleanly
    pub async fn shutdown(self) {
        self.poller.shutdown().await;
    }
}
