//! Unified error system for token rescue operations
//!
//! A single error type covers the whole workspace. The first four variants
//! mirror the failure classes the recovery flow has to report distinctly:
//! transient fetch failures are retried, precondition failures refuse
//! execution without consuming anything, snapshot failures abort an attempt
//! before submission, and submission failures leave the record valid for a
//! retry.

use serde::{Deserialize, Serialize};

/// Unified error type for all rescue operations
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum RescueError {
    /// Transient fetch failure (polling or balance read); safe to retry
    #[error("Transient: {message}")]
    Transient {
        /// Description of the failed fetch
        message: String,
    },

    /// Required execution input is missing; execution was refused
    #[error("Precondition failed: {message}")]
    Precondition {
        /// Which input was missing
        message: String,
    },

    /// A balance read failed, aborting the whole snapshot
    #[error("Snapshot failed: {message}")]
    Snapshot {
        /// Description of the failed balance read
        message: String,
    },

    /// The chain write failed or reverted
    #[error("Submission failed: {message}")]
    Submission {
        /// Description of the submission failure
        message: String,
    },

    /// Invalid input or configuration
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl RescueError {
    /// Create a transient fetch error
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Create a precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Create a snapshot error
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::Snapshot {
            message: message.into(),
        }
    }

    /// Create a submission error
    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error is safe to retry without operator intervention
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transient { .. } | Self::Snapshot { .. } | Self::Submission { .. }
        )
    }
}

/// Standard Result type for rescue operations
pub type Result<T> = std::result::Result<T, RescueError>;
