use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use warden_database::{
    EscalationPolicy, Ledger, LedgerError, SubjectId, WarningStore, should_auto_escalate,
};

const DEFAULT_REASON: &str = "Breaking server rules";
const MODERATOR: u64 = 974_206_310_058_967_060;

async fn open_in(dir: &TempDir) -> Ledger {
    Ledger::open(WarningStore::new(dir.path().join("warnings.json")), DEFAULT_REASON)
        .await
        .unwrap()
}

fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, second).unwrap()
}

#[tokio::test]
async fn unknown_subject_has_no_warnings() {
    let dir = TempDir::new().unwrap();
    let ledger = open_in(&dir).await;

    assert!(ledger.get_warnings(SubjectId(1234)).await.is_empty());
    assert_eq!(ledger.count_warnings(SubjectId(1234)).await, 0);
}

#[tokio::test]
async fn warnings_are_kept_in_call_order() {
    let dir = TempDir::new().unwrap();
    let ledger = open_in(&dir).await;
    let subject = SubjectId(42);

    for n in 0..6 {
        let reason = format!("reason {n}");
        let count = ledger
            .add_warning(subject, Some(reason.as_str()), MODERATOR, at(n))
            .await
            .unwrap();
        assert_eq!(count, n as usize + 1);
    }

    let warnings = ledger.get_warnings(subject).await;
    assert_eq!(ledger.count_warnings(subject).await, 6);
    for (n, warning) in warnings.iter().enumerate() {
        assert_eq!(warning.reason, format!("reason {n}"));
        assert_eq!(warning.timestamp, at(n as u32));
        assert_eq!(warning.issued_by, MODERATOR);
    }
}

#[tokio::test]
async fn removal_pops_the_most_recent_warning() {
    let dir = TempDir::new().unwrap();
    let ledger = open_in(&dir).await;
    let subject = SubjectId(42);

    ledger
        .add_warning(subject, Some("first"), MODERATOR, at(1))
        .await
        .unwrap();
    ledger
        .add_warning(subject, Some("second"), MODERATOR, at(2))
        .await
        .unwrap();
    ledger
        .add_warning(subject, Some("third"), MODERATOR, at(3))
        .await
        .unwrap();

    let removal = ledger.remove_last_warning(subject).await.unwrap();
    assert_eq!(removal.remaining, 2);
    assert_eq!(removal.removed.reason, "third");
    assert_eq!(removal.removed.timestamp, at(3));

    let remaining: Vec<_> = ledger
        .get_warnings(subject)
        .await
        .into_iter()
        .map(|warning| (warning.reason, warning.timestamp))
        .collect();
    assert_eq!(
        remaining,
        [("first".to_owned(), at(1)), ("second".to_owned(), at(2))]
    );
}

#[tokio::test]
async fn removal_without_warnings_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let ledger = open_in(&dir).await;
    let subject = SubjectId(42);

    let err = ledger.remove_last_warning(subject).await.unwrap_err();
    assert!(matches!(err, LedgerError::NoWarnings { subject: s } if s == subject));
    assert_eq!(ledger.count_warnings(subject).await, 0);
    assert!(!ledger.store().path().exists());

    ledger.add_warning(subject, None, MODERATOR, at(0)).await.unwrap();
    ledger.remove_last_warning(subject).await.unwrap();
    let on_disk = std::fs::read(ledger.store().path()).unwrap();

    let err = ledger.remove_last_warning(subject).await.unwrap_err();
    assert!(matches!(err, LedgerError::NoWarnings { .. }));
    assert_eq!(ledger.count_warnings(subject).await, 0);
    assert_eq!(std::fs::read(ledger.store().path()).unwrap(), on_disk);
}

#[tokio::test]
async fn saved_mapping_reloads_unchanged() {
    let dir = TempDir::new().unwrap();
    let ledger = open_in(&dir).await;

    ledger
        .add_warning(SubjectId(1), Some("spam"), MODERATOR, Utc::now())
        .await
        .unwrap();
    ledger
        .add_warning(SubjectId(2), None, 7, Utc::now())
        .await
        .unwrap();
    ledger
        .add_warning(SubjectId(2), Some("links"), 7, Utc::now())
        .await
        .unwrap();
    ledger.remove_last_warning(SubjectId(1)).await.unwrap();

    let before = ledger.snapshot().await;
    let store = ledger.store().clone();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, before);

    store.save(&loaded).await.unwrap();
    assert_eq!(store.load().await.unwrap(), before);
}

#[tokio::test]
async fn fifth_warning_triggers_escalation_until_one_is_removed() {
    let dir = TempDir::new().unwrap();
    let ledger = open_in(&dir).await;
    let policy = EscalationPolicy::new(NonZeroUsize::new(5).unwrap(), Duration::from_secs(86_400));
    let subject: SubjectId = "42".parse().unwrap();

    let mut count = 0;
    for n in 0..4 {
        count = ledger
            .add_warning(subject, None, MODERATOR, at(n))
            .await
            .unwrap();
    }
    assert_eq!(count, 4);
    assert!(!should_auto_escalate(count, 5));
    assert!(!policy.evaluate(count).is_escalated());

    let count = ledger
        .add_warning(subject, None, MODERATOR, at(4))
        .await
        .unwrap();
    assert_eq!(count, 5);
    assert!(should_auto_escalate(count, 5));
    assert!(policy.evaluate(count).is_escalated());

    let removal = ledger.remove_last_warning(subject).await.unwrap();
    assert_eq!(removal.remaining, 4);
    assert!(!should_auto_escalate(removal.remaining, 5));

    let count = ledger
        .add_warning(subject, None, MODERATOR, at(5))
        .await
        .unwrap();
    assert!(should_auto_escalate(count, 5));
}

#[tokio::test]
async fn reopened_ledger_sees_every_committed_warning() {
    let dir = TempDir::new().unwrap();
    let subject = SubjectId(42);

    let expected = {
        let ledger = open_in(&dir).await;
        ledger
            .add_warning(subject, Some("spam"), MODERATOR, at(1))
            .await
            .unwrap();
        ledger
            .add_warning(subject, Some("raid"), MODERATOR, at(2))
            .await
            .unwrap();
        ledger.get_warnings(subject).await
    };

    let reopened = open_in(&dir).await;
    assert_eq!(reopened.count_warnings(subject).await, 2);
    assert_eq!(reopened.get_warnings(subject).await, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_warnings_are_not_lost() {
    let dir = TempDir::new().unwrap();
    let ledger = Arc::new(open_in(&dir).await);
    let subject = SubjectId(42);

    let handles: Vec<_> = (0..32)
        .map(|n| {
            let ledger = Arc::clone(&ledger);
            tokio::spawn(async move {
                let reason = format!("admin {n}");
                ledger
                    .add_warning(subject, Some(reason.as_str()), n, Utc::now())
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(ledger.count_warnings(subject).await, 32);

    let reopened = open_in(&dir).await;
    assert_eq!(reopened.count_warnings(subject).await, 32);
}

#[tokio::test]
async fn corrupt_store_refuses_to_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("warnings.json");
    std::fs::write(&path, "not json").unwrap();

    let err = Ledger::open(WarningStore::new(&path), DEFAULT_REASON)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::CorruptState { .. }));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
}

#[tokio::test]
async fn legacy_store_is_loaded_and_rewritten_canonically() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("warnings.json");
    std::fs::write(
        &path,
        r#"{"42": [{"reason": "Breaking server rules", "timestamp": "2025-02-10T18:22:03.512345", "warned_by": 528858552094425089}], "7": []}"#,
    )
    .unwrap();

    let ledger = Ledger::open(WarningStore::new(&path), DEFAULT_REASON)
        .await
        .unwrap();
    assert_eq!(ledger.count_warnings(SubjectId(42)).await, 1);
    assert_eq!(ledger.count_warnings(SubjectId(7)).await, 0);

    ledger
        .add_warning(SubjectId(42), Some("spam"), MODERATOR, Utc::now())
        .await
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let first = &raw["42"][0];
    assert_eq!(first["issuedBy"], 528_858_552_094_425_089_u64);
    assert_eq!(first["timestamp"], "2025-02-10T18:22:03.512345Z");
    assert!(first.get("warned_by").is_none());
}
