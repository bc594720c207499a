//! # Rescue Core
//!
//! Core types, errors, and effect seams for the token rescue client.
//!
//! ## Purpose
//!
//! Foundation crate for the recovery finalization protocol:
//! - Identifier and signature types shared across the workspace
//! - The permit/witness structures consumed by the on-chain verifier
//! - The unified [`RescueError`] type and [`Result`] alias
//! - Effect traits for the three external collaborators: the
//!   signature/deadline source, the chain read client, and the chain write
//!   client
//!
//! ## What Does NOT Belong Here
//!
//! - Protocol logic (polling, quorum evaluation, permit assembly,
//!   execution) lives in `rescue-recovery`
//! - Production effect handlers live in `rescue-client`
//! - Mock handlers live in `rescue-testkit`

#![forbid(unsafe_code)]

/// Effect trait seams for external collaborators
pub mod effects;

/// Unified error type and result alias
pub mod errors;

/// Recovery session identifiers
pub mod identifiers;

/// Permit and witness structures for the verifier contract
pub mod permit;

/// Shared wire-adjacent types
pub mod types;

pub use errors::{RescueError, Result};
pub use identifiers::RecoveryId;
pub use permit::{
    PermitBatch, RecoveryCall, RecoveryInfo, SignedApproval, TokenPermission, TransferDetail,
    WitnessData,
};
pub use types::{GuardianSignature, RecoveryUpdate, TxReceipt};

// Chain primitives used throughout the workspace
pub use alloy_primitives::{Address, Bytes, B256, U256};
