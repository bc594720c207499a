//! Identifier types for rescue sessions
//!
//! A recovery attempt is keyed by an opaque identifier minted by the
//! signature backend at initiation. The identifier is the polling key and
//! the path segment of the shareable rescue link.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier for one in-progress recovery
///
/// Assigned by the backend when the recovery is initiated; stable for the
/// lifetime of the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecoveryId(String);

impl RecoveryId {
    /// Create from the backend-assigned token
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecoveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecoveryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecoveryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl FromStr for RecoveryId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}
