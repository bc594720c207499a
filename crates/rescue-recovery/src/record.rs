//! The mutable aggregate state of one in-progress recovery
//!
//! A [`RecoveryRecord`] is created when a recovery is initiated, mutated by
//! the signature poller for the lifetime of the session, consumed once by
//! the executor, and dropped with the session. There is no persistence
//! here; the backend owns durable state.

use rescue_core::{Address, Bytes, GuardianSignature, RecoveryId, RecoveryUpdate, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate state of one recovery attempt
///
/// `signatures` is keyed by guardian address: re-approval by the same
/// guardian overwrites its entry, so the map never holds two entries for
/// one guardian. `deadline` and `signatures_needed` start absent and are
/// filled in by the source once it knows them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryRecord {
    /// Stable polling key assigned at recovery initiation
    pub identifier: RecoveryId,
    /// The victim account funds are recovered from
    pub original_address: Address,
    /// Where recovered funds are sent
    pub recipient_address: Address,
    /// Registered guardian set
    pub squad: Vec<Address>,
    /// Quorum configuration passed to the verifier as witness data
    pub threshold: u16,
    /// Tokens eligible for recovery, in permit order
    pub permitted_tokens: Vec<Address>,
    /// Account-scoped replay nonce; passed through to the verifier
    pub nonce: U256,
    /// Signature from the designated backup key; required for execution
    pub backup_signature: Option<Bytes>,
    /// Collected guardian approvals, unique per guardian address
    pub signatures: HashMap<Address, GuardianSignature>,
    /// Quorum size, once supplied by the source
    pub signatures_needed: Option<u16>,
    /// Recovery-level deadline (unix seconds), once supplied by the source
    pub deadline: Option<u64>,
}

impl RecoveryRecord {
    /// Create a fresh record with no collected signatures
    pub fn new(
        identifier: RecoveryId,
        original_address: Address,
        recipient_address: Address,
        squad: Vec<Address>,
        threshold: u16,
        permitted_tokens: Vec<Address>,
        nonce: U256,
    ) -> Self {
        Self {
            identifier,
            original_address,
            recipient_address,
            squad,
            threshold,
            permitted_tokens,
            nonce,
            backup_signature: None,
            signatures: HashMap::new(),
            signatures_needed: None,
            deadline: None,
        }
    }

    /// Attach the backup-key signature
    pub fn with_backup_signature(mut self, signature: impl Into<Bytes>) -> Self {
        self.backup_signature = Some(signature.into());
        self
    }

    /// Merge one poll result into the record
    ///
    /// The source returns the full current signature set, so the merge
    /// replaces the map wholesale, keyed by guardian address (duplicates
    /// within one update collapse to the last entry). `deadline` and
    /// `signatures_needed` apply set-if-present: a poll that omits them
    /// never clears a previously observed value.
    pub fn apply_update(&mut self, update: RecoveryUpdate) {
        self.signatures = update
            .signatures
            .into_iter()
            .map(|sig| (sig.address, sig))
            .collect();

        if let Some(deadline) = update.deadline {
            self.deadline = Some(deadline);
        }
        if let Some(needed) = update.signatures_needed {
            self.signatures_needed = Some(needed);
        }
    }

    /// Record a single guardian approval, overwriting any prior entry for
    /// the same guardian
    pub fn upsert_signature(&mut self, signature: GuardianSignature) {
        self.signatures.insert(signature.address, signature);
    }

    /// Number of distinct guardians that have signed
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Whether a given guardian has an approval on record
    pub fn has_signed(&self, guardian: &Address) -> bool {
        self.signatures.contains_key(guardian)
    }

    /// Collected approvals in deterministic (address) order
    pub fn signatures_sorted(&self) -> Vec<&GuardianSignature> {
        let mut sigs: Vec<_> = self.signatures.values().collect();
        sigs.sort_by_key(|sig| sig.address);
        sigs
    }
}
