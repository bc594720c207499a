//! Effect composition for the recovery flow
//!
//! The protocol needs exactly three capabilities: the signature/deadline
//! source, chain reads for balances, and the chain write path. The
//! composed bound lets handlers and mocks provide all three behind one
//! type parameter while each component still names only what it uses.

use rescue_core::effects::{ChainReadEffects, ChainWriteEffects, RecoveryStoreEffects};

/// Combined effects required to drive a recovery session end to end
pub trait RescueEffects:
    RecoveryStoreEffects + ChainReadEffects + ChainWriteEffects + Send + Sync
{
}

/// Blanket implementation for any type providing all three capabilities
impl<T> RescueEffects for T where
    T: RecoveryStoreEffects + ChainReadEffects + ChainWriteEffects + Send + Sync
{
}
