//! Quorum evaluation
//!
//! Pure functions over a [`RecoveryRecord`]; nothing here caches, so the
//! result is always consistent with the record it was computed from.
//! Readiness cannot be claimed until the source has told us how many
//! signatures the quorum requires.

use crate::record::RecoveryRecord;
use serde::{Deserialize, Serialize};

/// Quorum progress derived from a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuorumStatus {
    /// The source has not yet reported the required signature count
    Unknown,
    /// Collecting approvals; `remaining` more distinct guardians needed
    Collecting {
        /// Signatures still missing
        remaining: u16,
    },
    /// Enough distinct guardians have approved
    Ready,
}

impl QuorumStatus {
    /// Whether execution may be triggered
    pub fn is_ready(&self) -> bool {
        matches!(self, QuorumStatus::Ready)
    }
}

/// Signatures still needed before quorum: `max(0, needed - collected)`
///
/// Well-defined with `signatures_needed` absent (treated as zero
/// known-needed); use [`quorum_status`] for readiness, which reports
/// `Unknown` in that case rather than ready.
pub fn signatures_left(record: &RecoveryRecord) -> u16 {
    let collected = u16::try_from(record.signature_count()).unwrap_or(u16::MAX);
    record
        .signatures_needed
        .unwrap_or(0)
        .saturating_sub(collected)
}

/// Evaluate quorum progress for a record
pub fn quorum_status(record: &RecoveryRecord) -> QuorumStatus {
    match record.signatures_needed {
        None => QuorumStatus::Unknown,
        Some(_) => match signatures_left(record) {
            0 => QuorumStatus::Ready,
            remaining => QuorumStatus::Collecting { remaining },
        },
    }
}
