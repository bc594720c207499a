//! Polling behavior against a scripted signature source
//!
//! Uses a short cadence so the tests complete quickly; the production
//! default of 3 seconds is just the config default.

use rescue_core::{RecoveryId, RecoveryUpdate, U256};
use rescue_recovery::{
    PollerConfig, QuorumStatus, RecoveryPhase, RecoveryRecord, RecoverySession, SignaturePoller,
    StatusHandle,
};
use rescue_testkit::{guardian_signature, test_address, test_token, MockRescueEffects};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{sleep, timeout};

fn fresh_record() -> RecoveryRecord {
    let mut record = RecoveryRecord::new(
        RecoveryId::new("rec-1"),
        test_address(0xaa),
        test_address(0xbb),
        vec![test_address(1), test_address(2), test_address(3)],
        2,
        vec![test_token(1)],
        U256::from(7u64),
    )
    .with_backup_signature(vec![0xb0; 65]);
    record.signatures_needed = Some(2);
    record
}

fn fast_config() -> PollerConfig {
    PollerConfig {
        interval: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn poller_merges_updates_into_record() {
    let effects = Arc::new(MockRescueEffects::new());
    effects.set_update(RecoveryUpdate {
        signatures: vec![guardian_signature(1), guardian_signature(2)],
        deadline: Some(1_700_000_000),
        signatures_needed: None,
    });

    let record = fresh_record();
    let (status, mut rx) = StatusHandle::channel(&record);
    let record = Arc::new(RwLock::new(record));
    let handle = SignaturePoller::new(effects.clone(), record.clone(), status)
        .with_config(fast_config())
        .spawn();

    // wait for the merge to land
    timeout(Duration::from_secs(2), async {
        loop {
            rx.changed().await.expect("status channel open");
            if rx.borrow().quorum.is_ready() {
                break;
            }
        }
    })
    .await
    .expect("quorum becomes ready");

    let merged = record.read().await.clone();
    assert_eq!(merged.signature_count(), 2);
    assert_eq!(merged.deadline, Some(1_700_000_000));
    handle.shutdown().await;
}

#[tokio::test]
async fn failed_poll_preserves_existing_state() {
    let effects = Arc::new(MockRescueEffects::new());
    effects.push_update(RecoveryUpdate {
        signatures: vec![guardian_signature(1)],
        deadline: Some(100),
        signatures_needed: None,
    });
    effects.push_fetch_failure("backend down");
    effects.push_fetch_failure("backend down");
    // after the failures the scripted update repeats

    let record = fresh_record();
    let (status, _rx) = StatusHandle::channel(&record);
    let record = Arc::new(RwLock::new(record));
    let handle = SignaturePoller::new(effects.clone(), record.clone(), status)
        .with_config(fast_config())
        .spawn();

    timeout(Duration::from_secs(2), async {
        while effects.fetch_count() < 4 {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("several polls happen");

    // the failures in between never cleared the first merge
    let merged = record.read().await.clone();
    assert_eq!(merged.signature_count(), 1);
    assert_eq!(merged.deadline, Some(100));
    handle.shutdown().await;
}

#[tokio::test]
async fn shutdown_stops_record_updates() {
    let effects = Arc::new(MockRescueEffects::new());
    let record = fresh_record();
    let (status, _rx) = StatusHandle::channel(&record);
    let record = Arc::new(RwLock::new(record));
    let handle = SignaturePoller::new(effects.clone(), record.clone(), status)
        .with_config(fast_config())
        .spawn();

    timeout(Duration::from_secs(2), async {
        while effects.fetch_count() == 0 {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("poller runs");

    handle.shutdown().await;
    let fetches_at_shutdown = effects.fetch_count();

    // now feed signatures; a live poller would merge them
    effects.set_update(RecoveryUpdate {
        signatures: vec![guardian_signature(1), guardian_signature(2)],
        deadline: Some(100),
        signatures_needed: None,
    });
    sleep(Duration::from_millis(50)).await;

    assert_eq!(effects.fetch_count(), fetches_at_shutdown);
    assert_eq!(record.read().await.signature_count(), 0);
}

#[tokio::test]
async fn dropping_the_handle_aborts_polling() {
    let effects = Arc::new(MockRescueEffects::new());
    let record = fresh_record();
    let (status, _rx) = StatusHandle::channel(&record);
    let record = Arc::new(RwLock::new(record));
    let handle = SignaturePoller::new(effects.clone(), record.clone(), status)
        .with_config(fast_config())
        .spawn();

    timeout(Duration::from_secs(2), async {
        while effects.fetch_count() == 0 {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("poller runs");

    drop(handle);
    sleep(Duration::from_millis(30)).await;
    let fetches_after_drop = effects.fetch_count();
    sleep(Duration::from_millis(50)).await;

    assert_eq!(effects.fetch_count(), fetches_after_drop);
}

#[tokio::test]
async fn session_walks_collecting_to_completed() {
    let effects = Arc::new(MockRescueEffects::new());
    effects.set_balance(test_token(1), test_address(0xaa), U256::from(100u64));
    effects.set_update(RecoveryUpdate {
        signatures: vec![guardian_signature(1)],
        deadline: Some(1_700_000_000),
        signatures_needed: Some(2),
    });

    let session = RecoverySession::start_with_config(
        effects.clone(),
        fresh_record(),
        fast_config(),
    );
    assert_eq!(
        session.rescue_link("https://rescue.example"),
        "https://rescue.example/rescue/rec-1"
    );

    let mut status = session.status();
    // one signature short
    timeout(Duration::from_secs(2), async {
        loop {
            if matches!(
                status.borrow().quorum,
                QuorumStatus::Collecting { remaining: 1 }
            ) {
                break;
            }
            status.changed().await.expect("status channel open");
        }
    })
    .await
    .expect("collecting with one remaining");

    // executing now is refused and nothing is submitted
    assert!(session.execute().await.is_err());
    assert_eq!(effects.submission_count(), 0);

    // the second guardian lands
    effects.set_update(RecoveryUpdate {
        signatures: vec![guardian_signature(1), guardian_signature(2)],
        deadline: Some(1_700_000_000),
        signatures_needed: Some(2),
    });
    timeout(Duration::from_secs(2), async {
        loop {
            if status.borrow().quorum.is_ready() {
                break;
            }
            status.changed().await.expect("status channel open");
        }
    })
    .await
    .expect("quorum ready");

    session.execute().await.expect("recovery succeeds");
    assert_eq!(effects.submission_count(), 1);
    assert_eq!(status.borrow().phase, RecoveryPhase::Completed);

    session.shutdown().await;
}
