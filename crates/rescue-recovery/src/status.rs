//! Observable session status
//!
//! The poller and the executor publish a [`RecoveryStatus`] snapshot over a
//! watch channel so UI layers can react to quorum and phase changes without
//! reading the record themselves. Execution failures land here as
//! `last_failure`, distinct from the collecting state, so a failed attempt
//! is never mistaken for pending quorum.

use crate::record::RecoveryRecord;
use crate::threshold::{self, QuorumStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Lifecycle phase of a recovery session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryPhase {
    /// Waiting for guardian approvals (or for the quorum size itself)
    Collecting,
    /// Quorum reached; execution may be triggered
    Ready,
    /// A submission attempt is in flight
    Executing,
    /// The recovery transaction was submitted successfully
    Completed,
    /// The session was abandoned
    Failed {
        /// Why the session ended
        reason: String,
    },
}

impl RecoveryPhase {
    fn from_quorum(quorum: QuorumStatus) -> Self {
        if quorum.is_ready() {
            RecoveryPhase::Ready
        } else {
            RecoveryPhase::Collecting
        }
    }

    /// Whether the session can still make progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecoveryPhase::Completed | RecoveryPhase::Failed { .. })
    }
}

/// Point-in-time view of a recovery session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryStatus {
    /// Current lifecycle phase
    pub phase: RecoveryPhase,
    /// Quorum progress
    pub quorum: QuorumStatus,
    /// Signatures still missing (zero while the quorum size is unknown)
    pub signatures_left: u16,
    /// Distinct guardians that have approved
    pub signature_count: usize,
    /// Most recent execution failure, cleared when a new attempt starts
    pub last_failure: Option<String>,
}

impl RecoveryStatus {
    /// Status derived from a record with no execution history
    pub fn from_record(record: &RecoveryRecord) -> Self {
        let quorum = threshold::quorum_status(record);
        Self {
            phase: RecoveryPhase::from_quorum(quorum),
            quorum,
            signatures_left: threshold::signatures_left(record),
            signature_count: record.signature_count(),
            last_failure: None,
        }
    }
}

/// Shared sender half of the status channel
///
/// Cloneable so the poller and the executor publish through the same
/// channel. The poller only moves the phase between `Collecting` and
/// `Ready`; execution phases are the executor's to set.
#[derive(Debug, Clone)]
pub struct StatusHandle {
    tx: Arc<watch::Sender<RecoveryStatus>>,
}

impl StatusHandle {
    /// Create a status channel seeded from the record's current state
    pub fn channel(record: &RecoveryRecord) -> (Self, watch::Receiver<RecoveryStatus>) {
        let (tx, rx) = watch::channel(RecoveryStatus::from_record(record));
        (Self { tx: Arc::new(tx) }, rx)
    }

    /// Subscribe another observer
    pub fn subscribe(&self) -> watch::Receiver<RecoveryStatus> {
        self.tx.subscribe()
    }

    /// Current published status
    pub fn current(&self) -> RecoveryStatus {
        self.tx.borrow().clone()
    }

    /// Re-derive quorum fields from the record after a merge
    ///
    /// Leaves the phase untouched while an execution is in flight or the
    /// session has ended.
    pub(crate) fn refresh_quorum(&self, record: &RecoveryRecord) {
        let quorum = threshold::quorum_status(record);
        let left = threshold::signatures_left(record);
        let count = record.signature_count();
        self.tx.send_modify(|status| {
            status.quorum = quorum;
            status.signatures_left = left;
            status.signature_count = count;
            if matches!(
                status.phase,
                RecoveryPhase::Collecting | RecoveryPhase::Ready
            ) {
                status.phase = RecoveryPhase::from_quorum(quorum);
            }
        });
    }

    pub(crate) fn set_phase(&self, phase: RecoveryPhase) {
        self.tx.send_modify(|status| status.phase = phase);
    }

    pub(crate) fn begin_attempt(&self) {
        self.tx.send_modify(|status| {
            status.phase = RecoveryPhase::Executing;
            status.last_failure = None;
        });
    }

    pub(crate) fn fail_attempt(&self, failure: &str, record: &RecoveryRecord) {
        let quorum = threshold::quorum_status(record);
        self.tx.send_modify(|status| {
            status.phase = RecoveryPhase::from_quorum(quorum);
            status.last_failure = Some(failure.to_owned());
        });
    }
}
