//! Signature/deadline source effect

use crate::errors::Result;
use crate::identifiers::RecoveryId;
use crate::types::RecoveryUpdate;
use async_trait::async_trait;

/// Client for the external service that stores guardian signatures and the
/// recovery deadline
///
/// The fetch must be idempotent and safe to call on a short fixed cadence
/// for the lifetime of a recovery view. Each result carries the full
/// current signature set, never a delta.
#[async_trait]
pub trait RecoveryStoreEffects: Send + Sync {
    /// Fetch the current signature set and deadline for one recovery
    async fn fetch_recovery(&self, id: &RecoveryId) -> Result<RecoveryUpdate>;
}
