//! Shareable rescue links
//!
//! A rescue link is a stateless URL of the shape `<base>/rescue/<id>`.
//! Anyone opening it resolves the same record by identifier, which is how
//! guardians reach the approval view.

use rescue_core::RecoveryId;

/// Build the shareable link for a recovery
pub fn rescue_link(base: &str, identifier: &RecoveryId) -> String {
    format!("{}/rescue/{}", base.trim_end_matches('/'), identifier)
}

/// Resolve a rescue link back to its recovery identifier
///
/// Returns `None` when the URL carries no `/rescue/<id>` segment or the
/// identifier is empty.
pub fn parse_rescue_link(url: &str) -> Option<RecoveryId> {
    let (_, rest) = url.split_once("/rescue/")?;
    let identifier = rest.split(['?', '#']).next().unwrap_or(rest);
    let identifier = identifier.trim_end_matches('/');
    if identifier.is_empty() || identifier.contains('/') {
        None
    } else {
        Some(RecoveryId::new(identifier))
    }
}
