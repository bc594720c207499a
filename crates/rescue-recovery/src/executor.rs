//! Recovery execution
//!
//! Drives the final leg of the protocol: validate preconditions, snapshot
//! live balances, assemble the permit batch, and submit the recovery call
//! exactly once. Execution is triggered explicitly, never from a quorum
//! transition, and at most one submission is ever in flight.
//!
//! A per-attempt failure (snapshot or submission) returns the executor to
//! `Ready`: nothing was consumed on-chain, the nonce is still valid, and a
//! re-trigger takes a fresh balance snapshot. `Failed` is terminal and only
//! entered through [`RecoveryExecutor::abandon`].

use crate::effects::RescueEffects;
use crate::permit::build_recovery_call;
use crate::record::RecoveryRecord;
use crate::snapshot::snapshot_balances;
use crate::status::{RecoveryPhase, StatusHandle};
use crate::threshold::{self, QuorumStatus};
use rescue_core::{Address, RescueError, Result, TxReceipt};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Submission latch: the executor's own slice of the session lifecycle
///
/// Collecting/Ready are derived from the record; only the execution leg
/// needs explicit state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ExecutionLatch {
    Idle,
    Executing,
    Completed,
    Failed(String),
}

/// Validates preconditions and submits the recovery call exactly once
pub struct RecoveryExecutor<E> {
    effects: Arc<E>,
    record: Arc<RwLock<RecoveryRecord>>,
    status: StatusHandle,
    latch: Mutex<ExecutionLatch>,
}

impl<E> RecoveryExecutor<E>
where
    E: RescueEffects,
{
    /// Create an executor over a shared record
    pub fn new(effects: Arc<E>, record: Arc<RwLock<RecoveryRecord>>, status: StatusHandle) -> Self {
        Self {
            effects,
            record,
            status,
            latch: Mutex::new(ExecutionLatch::Idle),
        }
    }

    /// Current lifecycle phase
    pub async fn phase(&self) -> RecoveryPhase {
        let latch = self.latch_state();
        match latch {
            ExecutionLatch::Executing => RecoveryPhase::Executing,
            ExecutionLatch::Completed => RecoveryPhase::Completed,
            ExecutionLatch::Failed(reason) => RecoveryPhase::Failed { reason },
            ExecutionLatch::Idle => {
                let record = self.record.read().await;
                if threshold::quorum_status(&record).is_ready() {
                    RecoveryPhase::Ready
                } else {
                    RecoveryPhase::Collecting
                }
            }
        }
    }

    /// Trigger the recovery submission
    ///
    /// Refused while quorum is still collecting, while a required input is
    /// missing, or while another submission is in flight. On a refused or
    /// failed attempt the session stays at `Ready` and may be re-triggered;
    /// the fresh trigger re-snapshots balances.
    pub async fn execute(&self) -> Result<TxReceipt> {
        // Immutable view of the record for the whole attempt: the poller
        // may keep merging behind us without tearing the dataset.
        let view = {
            let record = self.record.read().await;
            match threshold::quorum_status(&record) {
                QuorumStatus::Ready => {}
                QuorumStatus::Collecting { remaining } => {
                    return Err(RescueError::precondition(format!(
                        "guardian quorum not reached: {remaining} signatures still missing"
                    )));
                }
                QuorumStatus::Unknown => {
                    return Err(RescueError::precondition(
                        "required signature count not yet known",
                    ));
                }
            }
            validate_preconditions(&record)?;
            record.clone()
        };

        self.enter_executing()?;
        self.status.begin_attempt();
        info!(
            recovery = %view.identifier,
            guardians = view.signature_count(),
            tokens = view.permitted_tokens.len(),
            "executing recovery"
        );

        match self.run_attempt(&view).await {
            Ok(receipt) => {
                self.set_latch(ExecutionLatch::Completed);
                self.status.set_phase(RecoveryPhase::Completed);
                info!(recovery = %view.identifier, tx = %receipt.tx_hash, "recovery submitted");
                Ok(receipt)
            }
            Err(err) => {
                warn!(recovery = %view.identifier, error = %err, "recovery attempt failed");
                self.set_latch(ExecutionLatch::Idle);
                let record = self.record.read().await;
                self.status.fail_attempt(&err.to_string(), &record);
                Err(err)
            }
        }
    }

    /// Mark the session as terminally failed
    ///
    /// Idempotent; refused only after a completed submission.
    pub fn abandon(&self, reason: impl Into<String>) -> Result<()> {
        let reason = reason.into();
        #[allow(clippy::expect_used)] // lock is never poisoned: holders don't panic
        let mut latch = self.latch.lock().expect("executor latch poisoned");
        match &*latch {
            ExecutionLatch::Completed => {
                return Err(RescueError::invalid("cannot abandon a completed recovery"));
            }
            ExecutionLatch::Failed(_) => return Ok(()),
            _ => {}
        }
        *latch = ExecutionLatch::Failed(reason.clone());
        drop(latch);
        self.status.set_phase(RecoveryPhase::Failed { reason });
        Ok(())
    }

    /// Snapshot, build, submit: the fallible middle of an attempt
    async fn run_attempt(&self, view: &RecoveryRecord) -> Result<TxReceipt> {
        let snapshot = snapshot_balances(
            self.effects.as_ref(),
            &view.permitted_tokens,
            view.original_address,
        )
        .await?;
        let call = build_recovery_call(view, &snapshot)?;
        self.effects
            .submit_recovery(&call)
            .await
            .map_err(|err| match err {
                RescueError::Submission { .. } => err,
                other => RescueError::submission(other.to_string()),
            })
    }

    fn enter_executing(&self) -> Result<()> {
        #[allow(clippy::expect_used)] // lock is never poisoned: holders don't panic
        let mut latch = self.latch.lock().expect("executor latch poisoned");
        match &*latch {
            ExecutionLatch::Idle => {
                *latch = ExecutionLatch::Executing;
                Ok(())
            }
            ExecutionLatch::Executing => Err(RescueError::invalid(
                "a recovery submission is already in flight",
            )),
            ExecutionLatch::Completed => {
                Err(RescueError::invalid("recovery already completed"))
            }
            ExecutionLatch::Failed(reason) => Err(RescueError::invalid(format!(
                "recovery session was abandoned: {reason}"
            ))),
        }
    }

    fn set_latch(&self, state: ExecutionLatch) {
        #[allow(clippy::expect_used)] // lock is never poisoned: holders don't panic
        let mut latch = self.latch.lock().expect("executor latch poisoned");
        *latch = state;
    }

    fn latch_state(&self) -> ExecutionLatch {
        #[allow(clippy::expect_used)] // lock is never poisoned: holders don't panic
        self.latch.lock().expect("executor latch poisoned").clone()
    }
}

/// Check every input the submission needs is present
///
/// The typed record makes the addresses and nonce structurally present;
/// what can still be missing at trigger time is the backup signature, the
/// deadline, and placeholder (zero) addresses from an initiation that never
/// finished. The nonce itself is passed through unvalidated: the verifier
/// owns that check.
fn validate_preconditions(record: &RecoveryRecord) -> Result<()> {
    let mut missing = Vec::new();
    if record.backup_signature.is_none() {
        missing.push("backup signature");
    }
    if record.deadline.is_none() {
        missing.push("deadline");
    }
    if record.original_address == Address::ZERO {
        missing.push("original address");
    }
    if record.recipient_address == Address::ZERO {
        missing.push("recipient address");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RescueError::precondition(format!(
            "missing: {}",
            missing.join(", ")
        )))
    }
}
