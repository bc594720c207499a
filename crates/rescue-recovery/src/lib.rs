//! # Rescue Recovery
//!
//! Client-side orchestration of the recovery finalization protocol:
//! collect and deduplicate guardian approvals, evaluate quorum, snapshot
//! live balances at execution time, assemble the signed multi-token
//! transfer permit, and submit the one-shot recovery call.
//!
//! ## Control Flow
//!
//! ```text
//! SignaturePoller ──merge──▶ RecoveryRecord ◀──read── ThresholdEvaluator
//!                                  │
//!                        user triggers execute()
//!                                  ▼
//!                          RecoveryExecutor
//!            preconditions ▶ BalanceSnapshotter ▶ PermitBatchBuilder
//!                                  ▼
//!                      ChainWriteEffects::submit_recovery
//! ```
//!
//! The poller feeds the record for the lifetime of the session and a watch
//! channel notifies observers of quorum and phase changes. Execution is
//! always user-triggered: the executor validates preconditions, takes an
//! immutable view of the record, reads every permitted token's balance
//! concurrently, and hands the verifier a single internally consistent
//! argument set (matching guardians, signatures, deadline, and nonce) or
//! nothing at all.
//!
//! ## Key Properties
//!
//! - **Upsert by guardian**: re-approval never inflates the signature count
//! - **Late balances**: snapshots are taken per attempt, never cached
//! - **All-or-nothing snapshots**: one failed read aborts the attempt
//! - **Single flight**: a second trigger while executing is rejected
//! - **Clean teardown**: dropping the session cancels polling before the
//!   record can be written again

#![forbid(unsafe_code)]

/// Composed effect bound for the full flow
pub mod effects;

/// Recovery execution and the submission latch
pub mod executor;

/// Shareable rescue links
pub mod link;

/// Permit batch assembly
pub mod permit;

/// Signature polling
pub mod poller;

/// The mutable recovery record and merge semantics
pub mod record;

/// Session wiring and lifetime ownership
pub mod session;

/// Execution-time balance snapshots
pub mod snapshot;

/// Observable session status
pub mod status;

/// Quorum evaluation
pub mod threshold;

// Core error types
pub use rescue_core::{RescueError, Result};

// Re-export essential types
pub use effects::RescueEffects;
pub use executor::RecoveryExecutor;
pub use link::{parse_rescue_link, rescue_link};
pub use permit::build_recovery_call;
pub use poller::{PollerConfig, PollerHandle, SignaturePoller};
pub use record::RecoveryRecord;
pub use session::RecoverySession;
pub use snapshot::{snapshot_balances, BalanceSnapshot, TokenBalance};
pub use status::{RecoveryPhase, RecoveryStatus, StatusHandle};
pub use threshold::{quorum_status, signatures_left, QuorumStatus};
