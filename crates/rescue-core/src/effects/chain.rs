//! Chain client effects

use crate::errors::Result;
use crate::permit::RecoveryCall;
use crate::types::TxReceipt;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;

/// Read-only chain queries used during recovery
#[async_trait]
pub trait ChainReadEffects: Send + Sync {
    /// Current balance of `owner` for one token contract
    ///
    /// Called once per permitted token per execution attempt; balances are
    /// read as late as possible because funds move between approval and
    /// execution.
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256>;
}

/// Submission path to the verifier contract
///
/// The verifier checks guardian signatures, the backup signature, nonce and
/// deadline, and performs the multi-token transfer atomically. The call
/// either fully succeeds or fails with no partial transfers.
#[async_trait]
pub trait ChainWriteEffects: Send + Sync {
    /// Submit the assembled recovery call
    async fn submit_recovery(&self, call: &RecoveryCall) -> Result<TxReceipt>;
}
