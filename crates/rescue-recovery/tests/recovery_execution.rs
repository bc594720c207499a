//! End-to-end execution tests against mock effects
//!
//! Drives the full flow the way a recovery view would: merge guardian
//! approvals into the record, trigger execution, and assert on what (if
//! anything) reached the chain write client.

use assert_matches::assert_matches;
use rescue_core::{GuardianSignature, RecoveryId, RecoveryUpdate, RescueError, U256};
use rescue_recovery::{
    build_recovery_call, quorum_status, signatures_left, snapshot_balances, QuorumStatus,
    RecoveryExecutor, RecoveryPhase, RecoveryRecord, StatusHandle,
};
use rescue_testkit::{guardian_signature, test_address, test_token, MockRescueEffects};
use std::sync::Arc;
use tokio::sync::RwLock;

const VICTIM: u8 = 0xaa;
const RECIPIENT: u8 = 0xbb;

fn sample_record(token_count: u8, needed: u16) -> RecoveryRecord {
    let mut record = RecoveryRecord::new(
        RecoveryId::new("rec-1"),
        test_address(VICTIM),
        test_address(RECIPIENT),
        vec![test_address(1), test_address(2), test_address(3)],
        needed,
        (1..=token_count).map(test_token).collect(),
        U256::from(42u64),
    )
    .with_backup_signature(vec![0xb0; 65]);
    record.deadline = Some(1_700_000_000);
    record.signatures_needed = Some(needed);
    record
}

fn executor(
    effects: &Arc<MockRescueEffects>,
    record: RecoveryRecord,
) -> (
    RecoveryExecutor<MockRescueEffects>,
    Arc<RwLock<RecoveryRecord>>,
    StatusHandle,
) {
    let (status, _rx) = StatusHandle::channel(&record);
    let record = Arc::new(RwLock::new(record));
    let exec = RecoveryExecutor::new(effects.clone(), record.clone(), status.clone());
    (exec, record, status)
}

fn approve(record: &mut RecoveryRecord, seeds: &[u8]) {
    for seed in seeds {
        record.upsert_signature(guardian_signature(*seed));
    }
}

#[tokio::test]
async fn quorum_walk_three_guardians() {
    let mut record = sample_record(1, 3);

    approve(&mut record, &[1, 2]);
    assert_eq!(signatures_left(&record), 1);
    assert_matches!(
        quorum_status(&record),
        QuorumStatus::Collecting { remaining: 1 }
    );

    approve(&mut record, &[3]);
    assert_eq!(signatures_left(&record), 0);
    assert!(quorum_status(&record).is_ready());

    // re-approval by guardian 1 with new bytes keeps cardinality
    record.upsert_signature(GuardianSignature::new(test_address(1), vec![0xff; 65]));
    assert_eq!(record.signature_count(), 3);
    assert_eq!(signatures_left(&record), 0);
}

#[tokio::test]
async fn happy_path_submits_consistent_call() {
    let effects = Arc::new(MockRescueEffects::new());
    effects.set_balance(test_token(1), test_address(VICTIM), U256::from(100u64));
    // token 2 drained after approval: balance zero is still transferred as zero
    effects.set_balance(test_token(2), test_address(VICTIM), U256::ZERO);

    let mut record = sample_record(2, 2);
    approve(&mut record, &[1, 2]);
    let (exec, _record, _status) = executor(&effects, record);

    let receipt = exec.execute().await.expect("recovery succeeds");
    assert!(receipt.block_number.is_none());
    assert_eq!(exec.phase().await, RecoveryPhase::Completed);

    let submissions = effects.submissions();
    assert_eq!(submissions.len(), 1);
    let call = &submissions[0];

    assert_eq!(call.permit.permitted.len(), 2);
    assert_eq!(call.recovery_info.transfer_details.len(), 2);
    assert_eq!(call.approvals.len(), 2);
    assert_eq!(
        call.recovery_info.transfer_details[0].requested_amount,
        U256::from(100u64)
    );
    assert_eq!(
        call.recovery_info.transfer_details[1].requested_amount,
        U256::ZERO
    );
    for permission in &call.permit.permitted {
        assert_eq!(permission.amount, U256::MAX);
    }
    assert_eq!(call.permit.nonce, U256::from(42u64));
    assert_eq!(call.witness.threshold, 2);
    assert_eq!(call.witness.signers.len(), 3);
    for approval in &call.approvals {
        assert_eq!(approval.sig_deadline, 1_700_000_000);
    }
}

#[tokio::test]
async fn collecting_record_refuses_execution() {
    let effects = Arc::new(MockRescueEffects::new());
    let mut record = sample_record(1, 3);
    approve(&mut record, &[1, 2]);
    let (exec, _record, _status) = executor(&effects, record);

    let err = exec.execute().await.expect_err("refused");
    assert_matches!(err, RescueError::Precondition { .. });
    assert_eq!(effects.submission_count(), 0);
    assert_eq!(exec.phase().await, RecoveryPhase::Collecting);
}

#[tokio::test]
async fn missing_backup_signature_is_a_named_refusal() {
    let effects = Arc::new(MockRescueEffects::new());
    let mut record = sample_record(1, 1);
    approve(&mut record, &[1]);
    record.backup_signature = None;
    let (exec, _record, _status) = executor(&effects, record);

    let err = exec.execute().await.expect_err("refused");
    assert_matches!(err, RescueError::Precondition { .. });
    assert!(err.to_string().contains("backup signature"));
    assert_eq!(effects.submission_count(), 0);
    // still Ready: quorum is met, only the input is missing
    assert_eq!(exec.phase().await, RecoveryPhase::Ready);
}

#[tokio::test]
async fn missing_deadline_refused_until_poll_supplies_it() {
    let effects = Arc::new(MockRescueEffects::new());
    let mut record = sample_record(1, 1);
    approve(&mut record, &[1]);
    record.deadline = None;
    let (exec, record, _status) = executor(&effects, record);

    let err = exec.execute().await.expect_err("refused");
    assert_matches!(err, RescueError::Precondition { .. });
    assert!(err.to_string().contains("deadline"));
    assert_eq!(effects.submission_count(), 0);

    // a later poll result supplies the deadline, then execution proceeds
    record.write().await.apply_update(RecoveryUpdate {
        signatures: vec![guardian_signature(1)],
        deadline: Some(1_700_000_500),
        signatures_needed: None,
    });
    exec.execute().await.expect("succeeds after deadline known");
    assert_eq!(effects.submission_count(), 1);
    assert_eq!(effects.submissions()[0].approvals[0].sig_deadline, 1_700_000_500);
}

#[tokio::test]
async fn snapshot_failure_aborts_before_submission() {
    let effects = Arc::new(MockRescueEffects::new());
    effects.set_balance(test_token(1), test_address(VICTIM), U256::from(5u64));
    effects.fail_balance(test_token(2));

    let mut record = sample_record(2, 1);
    approve(&mut record, &[1]);
    let (exec, _record, _status) = executor(&effects, record);

    let err = exec.execute().await.expect_err("aborted");
    assert_matches!(err, RescueError::Snapshot { .. });
    assert_eq!(effects.submission_count(), 0);
    assert_eq!(exec.phase().await, RecoveryPhase::Ready);
}

#[tokio::test]
async fn submission_failure_returns_to_ready_and_retry_resnapshots() {
    let effects = Arc::new(MockRescueEffects::new());
    effects.set_balance(test_token(1), test_address(VICTIM), U256::from(100u64));
    effects.fail_submission("verifier reverted");

    let mut record = sample_record(1, 1);
    approve(&mut record, &[1]);
    let (exec, _record, status) = executor(&effects, record);

    let err = exec.execute().await.expect_err("submission fails");
    assert_matches!(err, RescueError::Submission { .. });
    assert_eq!(exec.phase().await, RecoveryPhase::Ready);
    assert!(status.current().last_failure.is_some());

    // balance drifts before the retry; the fresh snapshot picks it up
    effects.restore_submission();
    effects.set_balance(test_token(1), test_address(VICTIM), U256::from(60u64));

    exec.execute().await.expect("retry succeeds");
    let submissions = effects.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].recovery_info.transfer_details[0].requested_amount,
        U256::from(60u64)
    );
}

#[tokio::test]
async fn completed_recovery_cannot_be_rerun() {
    let effects = Arc::new(MockRescueEffects::new());
    let mut record = sample_record(1, 1);
    approve(&mut record, &[1]);
    let (exec, _record, _status) = executor(&effects, record);

    exec.execute().await.expect("first run succeeds");
    let err = exec.execute().await.expect_err("second run refused");
    assert_matches!(err, RescueError::Invalid { .. });
    assert_eq!(effects.submission_count(), 1);
}

#[tokio::test]
async fn concurrent_triggers_submit_exactly_once() {
    let effects = Arc::new(MockRescueEffects::new());
    let mut record = sample_record(1, 1);
    approve(&mut record, &[1]);

    let (status, _rx) = StatusHandle::channel(&record);
    let record = Arc::new(RwLock::new(record));
    let exec = Arc::new(RecoveryExecutor::new(
        effects.clone(),
        record.clone(),
        status,
    ));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let exec = exec.clone();
        handles.push(tokio::spawn(async move { exec.execute().await }));
    }
    let results: Vec<_> = futures::future::join_all(handles).await;

    let successes = results
        .iter()
        .filter(|res| matches!(res, Ok(Ok(_))))
        .count();
    // one winner; the rest were rejected as in-flight or already completed
    assert_eq!(successes, 1);
    assert_eq!(effects.submission_count(), 1);
}

#[tokio::test]
async fn abandoned_session_refuses_execution() {
    let effects = Arc::new(MockRescueEffects::new());
    let mut record = sample_record(1, 1);
    approve(&mut record, &[1]);
    let (exec, _record, _status) = executor(&effects, record);

    exec.abandon("user closed the recovery view")
        .expect("abandon succeeds");
    assert_matches!(exec.phase().await, RecoveryPhase::Failed { .. });

    let err = exec.execute().await.expect_err("refused");
    assert_matches!(err, RescueError::Invalid { .. });
    assert_eq!(effects.submission_count(), 0);
}

#[tokio::test]
async fn builder_output_matches_snapshot_lengths() {
    let effects = MockRescueEffects::new();
    for seed in 1..=4u8 {
        effects.set_balance(
            test_token(seed),
            test_address(VICTIM),
            U256::from(seed as u64),
        );
    }
    let mut record = sample_record(4, 2);
    approve(&mut record, &[1, 3]);

    let snapshot = snapshot_balances(&effects, &record.permitted_tokens, record.original_address)
        .await
        .expect("snapshot succeeds");
    assert_eq!(snapshot.len(), record.permitted_tokens.len());

    let call = build_recovery_call(&record, &snapshot).expect("builds");
    assert_eq!(call.permit.permitted.len(), snapshot.len());
    assert_eq!(call.recovery_info.transfer_details.len(), snapshot.len());
    assert_eq!(call.approvals.len(), record.signature_count());
}
