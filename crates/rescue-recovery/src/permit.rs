//! Permit batch assembly
//!
//! Builds the complete argument set for the on-chain verifier from a
//! record and a fresh balance snapshot. The builder's only responsibility
//! is correct, order-matched assembly; it verifies no signatures itself.
//!
//! Two deadlines coexist on purpose: the permit's own expiry is pinned to
//! `U256::MAX` (non-binding), while each guardian approval carries the
//! recovery-level deadline, which is the check the verifier enforces.

use crate::record::RecoveryRecord;
use crate::snapshot::BalanceSnapshot;
use rescue_core::{
    PermitBatch, RecoveryCall, RecoveryInfo, RescueError, Result, SignedApproval, TokenPermission,
    TransferDetail, WitnessData, U256,
};

/// Assemble the one-shot recovery call
///
/// For each snapshot entry this emits a `U256::MAX` allowance cap paired
/// with a transfer of exactly the snapshotted balance to the recipient.
/// Fails if the snapshot does not line up with the record's permitted
/// tokens, or if the backup signature or deadline is still missing.
pub fn build_recovery_call(
    record: &RecoveryRecord,
    snapshot: &BalanceSnapshot,
) -> Result<RecoveryCall> {
    let backup_signature = record
        .backup_signature
        .clone()
        .ok_or_else(|| RescueError::precondition("backup signature missing"))?;
    let sig_deadline = record
        .deadline
        .ok_or_else(|| RescueError::precondition("deadline not yet known"))?;

    if snapshot.len() != record.permitted_tokens.len() {
        return Err(RescueError::invalid(format!(
            "snapshot covers {} tokens, record permits {}",
            snapshot.len(),
            record.permitted_tokens.len()
        )));
    }

    let mut permitted = Vec::with_capacity(snapshot.len());
    let mut transfer_details = Vec::with_capacity(snapshot.len());
    for (entry, expected) in snapshot.iter().zip(&record.permitted_tokens) {
        if entry.token != *expected {
            return Err(RescueError::invalid(format!(
                "snapshot order mismatch: got {}, expected {expected}",
                entry.token
            )));
        }
        permitted.push(TokenPermission {
            token: entry.token,
            amount: U256::MAX,
        });
        transfer_details.push(TransferDetail {
            to: record.recipient_address,
            requested_amount: entry.balance,
        });
    }

    let approvals = record
        .signatures_sorted()
        .into_iter()
        .map(|sig| SignedApproval {
            address: sig.address,
            signature: sig.signature.clone(),
            sig_deadline,
        })
        .collect();

    Ok(RecoveryCall {
        approvals,
        backup_signature,
        permit: PermitBatch {
            permitted,
            nonce: record.nonce,
            deadline: U256::MAX,
        },
        recovery_info: RecoveryInfo {
            old_address: record.original_address,
            transfer_details,
        },
        witness: WitnessData {
            signers: record.squad.clone(),
            threshold: record.threshold,
        },
    })
}
