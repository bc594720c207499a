//! # Rescue Client
//!
//! Production handler for the external signature/deadline source: an HTTPS
//! client implementing [`rescue_core::effects::RecoveryStoreEffects`].
//!
//! Chain read/write handlers are intentionally absent here: wallet and
//! provider plumbing belongs to the embedding application, which implements
//! the chain effect traits against whatever signer it holds.

#![forbid(unsafe_code)]

/// Client configuration
pub mod config;

/// The HTTPS store client
pub mod store;

pub use config::StoreClientConfig;
pub use store::HttpRecoveryStore;
