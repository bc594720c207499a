//! Shared wire-adjacent types for rescue operations

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

/// A guardian's approval signature over a recovery
///
/// Signature bytes are opaque to this client; verification happens in the
/// on-chain verifier contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianSignature {
    /// Guardian address the signature belongs to
    pub address: Address,
    /// Raw signature bytes
    pub signature: Bytes,
}

impl GuardianSignature {
    /// Pair a guardian address with its signature bytes
    pub fn new(address: Address, signature: impl Into<Bytes>) -> Self {
        Self {
            address,
            signature: signature.into(),
        }
    }
}

/// One poll result from the signature/deadline source
///
/// The source returns the full current signature set each time, not a
/// delta. `deadline` and `signatures_needed` are set-if-present on merge;
/// the source owns both and may learn them after the record was created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryUpdate {
    /// Complete current set of guardian signatures
    pub signatures: Vec<GuardianSignature>,
    /// Recovery-level deadline (unix seconds), once the source knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<u64>,
    /// Quorum size required by the backup configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatures_needed: Option<u16>,
}

/// Receipt for a submitted recovery transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash of the recovery call
    pub tx_hash: B256,
    /// Block the transaction was included in, if already mined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

impl TxReceipt {
    /// Receipt for a transaction that is submitted but not yet mined
    pub fn pending(tx_hash: B256) -> Self {
        Self {
            tx_hash,
            block_number: None,
        }
    }
}
