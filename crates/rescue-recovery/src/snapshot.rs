//! Execution-time balance snapshots
//!
//! Balances drift between guardian approval and execution, so the snapshot
//! is taken as late as possible: only when the user triggers execution, and
//! fresh on every attempt. All token reads run concurrently; one failed
//! read fails the whole snapshot, so no partial dataset ever reaches the
//! permit builder.

use futures::future::try_join_all;
use rescue_core::effects::ChainReadEffects;
use rescue_core::{Address, RescueError, Result, U256};
use tracing::debug;

/// One token's balance at snapshot time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBalance {
    /// Token contract address
    pub token: Address,
    /// Owner balance when the read returned
    pub balance: U256,
}

/// Balances for every permitted token, order-matched with the input
///
/// Ephemeral by design: produced per execution attempt and never reused,
/// because a cached snapshot would reintroduce the staleness the late read
/// exists to avoid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSnapshot {
    entries: Vec<TokenBalance>,
}

impl BalanceSnapshot {
    /// Number of snapshotted tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot covers no tokens
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in permit order
    pub fn iter(&self) -> impl Iterator<Item = &TokenBalance> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a BalanceSnapshot {
    type Item = &'a TokenBalance;
    type IntoIter = std::slice::Iter<'a, TokenBalance>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Read the owner's balance for every token, concurrently
///
/// The output preserves the input order so the permit builder can zip by
/// index. Any single read failure aborts the whole snapshot.
pub async fn snapshot_balances<E>(
    effects: &E,
    tokens: &[Address],
    owner: Address,
) -> Result<BalanceSnapshot>
where
    E: ChainReadEffects + ?Sized,
{
    let reads = tokens.iter().map(|token| {
        let token = *token;
        async move {
            effects
                .balance_of(token, owner)
                .await
                .map(|balance| TokenBalance { token, balance })
                .map_err(|err| {
                    RescueError::snapshot(format!("balance read for {token} failed: {err}"))
                })
        }
    });

    let entries = try_join_all(reads).await?;
    debug!(owner = %owner, tokens = entries.len(), "balance snapshot complete");
    Ok(BalanceSnapshot { entries })
}
