//! Mock effects implementation for deterministic testing
//!
//! One state block behind a mutex implements all three effect traits.
//! Poll results are scripted as a queue of one-shot responses layered over
//! a "current" update that repeats once the script runs dry, which matches
//! the real source's idempotent behavior. Balance reads come from a
//! per-token table with per-token failure injection, and submissions are
//! logged rather than sent anywhere.
//!
//! Uses `std::sync::Mutex`: this is test infrastructure, nothing holds the
//! lock across an await point, and the synchronous API keeps tests simple.

use async_trait::async_trait;
use rescue_core::effects::{ChainReadEffects, ChainWriteEffects, RecoveryStoreEffects};
use rescue_core::{
    Address, RecoveryCall, RecoveryId, RecoveryUpdate, RescueError, Result, TxReceipt, B256, U256,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

/// One scripted response for a poll
#[derive(Debug, Clone)]
enum ScriptedFetch {
    Update(RecoveryUpdate),
    Failure(String),
}

#[derive(Debug, Default)]
struct MockState {
    /// One-shot scripted responses, consumed in order
    script: VecDeque<ScriptedFetch>,
    /// What the source currently returns once the script is exhausted
    current: RecoveryUpdate,
    /// Balances by (token, owner)
    balances: HashMap<(Address, Address), U256>,
    /// Tokens whose balance reads fail
    failing_tokens: HashSet<Address>,
    /// When set, submissions fail with this message
    submission_failure: Option<String>,
    /// Every recovery call that reached the chain write client
    submissions: Vec<RecoveryCall>,
    /// Number of fetches served (successes and failures)
    fetches: u64,
}

/// Deterministic implementation of every rescue effect trait
#[derive(Debug, Clone, Default)]
pub struct MockRescueEffects {
    state: Arc<Mutex<MockState>>,
}

impl MockRescueEffects {
    /// Create an empty mock: no signatures, no balances, submissions succeed
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // SIGNATURE SOURCE SCRIPTING
    // =========================================================================

    /// Set what the source currently returns (repeats until changed)
    pub fn set_update(&self, update: RecoveryUpdate) {
        self.lock().current = update;
    }

    /// Queue a one-shot response; after it is served, `set_update`'s value
    /// (updated to this one) repeats
    pub fn push_update(&self, update: RecoveryUpdate) {
        self.lock().script.push_back(ScriptedFetch::Update(update));
    }

    /// Queue a one-shot fetch failure
    pub fn push_fetch_failure(&self, message: impl Into<String>) {
        self.lock()
            .script
            .push_back(ScriptedFetch::Failure(message.into()));
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> u64 {
        self.lock().fetches
    }

    // =========================================================================
    // CHAIN STATE
    // =========================================================================

    /// Set a token balance for an owner
    pub fn set_balance(&self, token: Address, owner: Address, amount: U256) {
        self.lock().balances.insert((token, owner), amount);
    }

    /// Make balance reads for one token fail
    pub fn fail_balance(&self, token: Address) {
        self.lock().failing_tokens.insert(token);
    }

    /// Let a previously failing token read succeed again
    pub fn restore_balance(&self, token: Address) {
        self.lock().failing_tokens.remove(&token);
    }

    /// Make submissions fail with the given revert message
    pub fn fail_submission(&self, message: impl Into<String>) {
        self.lock().submission_failure = Some(message.into());
    }

    /// Let submissions succeed again
    pub fn restore_submission(&self) {
        self.lock().submission_failure = None;
    }

    /// Every recovery call submitted so far
    pub fn submissions(&self) -> Vec<RecoveryCall> {
        self.lock().submissions.clone()
    }

    /// Number of recovery calls submitted so far
    pub fn submission_count(&self) -> usize {
        self.lock().submissions.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }
}

#[async_trait]
impl RecoveryStoreEffects for MockRescueEffects {
    async fn fetch_recovery(&self, _id: &RecoveryId) -> Result<RecoveryUpdate> {
        let mut state = self.lock();
        state.fetches += 1;
        match state.script.pop_front() {
            Some(ScriptedFetch::Update(update)) => {
                state.current = update.clone();
                Ok(update)
            }
            Some(ScriptedFetch::Failure(message)) => Err(RescueError::transient(message)),
            None => Ok(state.current.clone()),
        }
    }
}

#[async_trait]
impl ChainReadEffects for MockRescueEffects {
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        let state = self.lock();
        if state.failing_tokens.contains(&token) {
            return Err(RescueError::transient(format!(
                "balance read for {token} unavailable"
            )));
        }
        Ok(state
            .balances
            .get(&(token, owner))
            .copied()
            .unwrap_or(U256::ZERO))
    }
}

#[async_trait]
impl ChainWriteEffects for MockRescueEffects {
    async fn submit_recovery(&self, call: &RecoveryCall) -> Result<TxReceipt> {
        let mut state = self.lock();
        if let Some(message) = &state.submission_failure {
            return Err(RescueError::submission(message.clone()));
        }
        state.submissions.push(call.clone());
        // deterministic receipt: hash encodes the submission ordinal
        let ordinal = state.submissions.len() as u8;
        Ok(TxReceipt::pending(B256::with_last_byte(ordinal)))
    }
}
