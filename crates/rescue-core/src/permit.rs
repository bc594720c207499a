//! Permit and witness structures consumed by the on-chain verifier
//!
//! The recovery call is a four-way structure: guardian approvals, the
//! backup-key signature with its permit data, the transfer details, and the
//! witness data the verifier uses to re-validate quorum. This module only
//! defines the shapes; assembly lives in the recovery crate and all
//! verification happens on-chain.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Permission to transfer up to `amount` of one token
///
/// The amount is a ceiling, not the moved amount; the recovery flow always
/// sets it to `U256::MAX` and bounds the actual transfer via
/// [`TransferDetail::requested_amount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPermission {
    /// Token contract address
    pub token: Address,
    /// Allowance ceiling
    pub amount: U256,
}

/// The signed multi-token permit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitBatch {
    /// One permission per permitted token, order-matched with the
    /// transfer details
    pub permitted: Vec<TokenPermission>,
    /// Account-scoped replay nonce; must match the verifier's expected
    /// nonce at execution time
    pub nonce: U256,
    /// Permit expiry. Pinned to `U256::MAX`: the permit itself does not
    /// expire, the recovery-level deadline carried per signature is the
    /// operative check.
    pub deadline: U256,
}

/// One requested transfer in the recovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferDetail {
    /// Recipient of the recovered funds
    pub to: Address,
    /// Exact amount to move, captured from the balance snapshot
    pub requested_amount: U256,
}

/// A guardian approval as submitted to the verifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedApproval {
    /// Guardian address
    pub address: Address,
    /// Guardian signature bytes
    pub signature: Bytes,
    /// Per-signature deadline (unix seconds); the recovery-level deadline
    pub sig_deadline: u64,
}

/// Transfer context for the account being recovered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryInfo {
    /// The victim account funds are moved away from
    pub old_address: Address,
    /// One entry per permitted token, order-matched with the permit
    pub transfer_details: Vec<TransferDetail>,
}

/// Guardian set and threshold for on-chain quorum re-validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessData {
    /// The registered guardian set
    pub signers: Vec<Address>,
    /// Minimum number of guardian signatures the verifier requires
    pub threshold: u16,
}

/// The complete argument set for the one-shot recovery submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryCall {
    /// Collected guardian approvals
    pub approvals: Vec<SignedApproval>,
    /// Signature from the account's designated backup key
    pub backup_signature: Bytes,
    /// The multi-token permit
    pub permit: PermitBatch,
    /// Transfer context
    pub recovery_info: RecoveryInfo,
    /// Quorum witness
    pub witness: WitnessData,
}
