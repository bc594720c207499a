//! Effect trait seams for external collaborators
//!
//! The recovery flow talks to three external systems: the service that
//! stores guardian signatures and the deadline, a chain read client for
//! live balances, and the chain write client fronting the verifier
//! contract. Each is an async trait so production handlers and test mocks
//! plug in interchangeably.

pub mod chain;
pub mod store;

pub use chain::{ChainReadEffects, ChainWriteEffects};
pub use store::RecoveryStoreEffects;
