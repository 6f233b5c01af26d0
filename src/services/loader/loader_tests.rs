use super::*;
use crate::services::memory_store::MemoryTabStore;
use std::sync::mpsc;
use std::time::Duration;

#[test]
fn execute_maps_requests_to_replies() {
    let store = MemoryTabStore::demo();
    match execute(&store, &StoreRequest::List {
            refresh: Refresh::Reset,
        }) {
        Ok(StoreReply::Tabs(tabs)) => assert_eq!(tabs[0].name, "顧客"),
        other => panic!("expected tabs, got {other:?}"),
    }
    match execute(
        &store,
        &StoreRequest::Create {
            name: "Leads".into(),
        },
    ) {
        Ok(StoreReply::Created(t)) => assert_eq!(t.name, "Leads"),
        other => panic!("expected created tab, got {other:?}"),
    }
    let err = execute(
        &store,
        &StoreRequest::Delete {
            tab_id: "missing".into(),
        },
    );
    assert!(matches!(err, Err(StoreError::Backend(_))));
}

#[test]
fn spawned_request_reports_kind_and_outcome() {
    let store: Arc<dyn TabStore> = Arc::new(MemoryTabStore::demo());
    let (tx, rx) = mpsc::channel();
    spawn_store_request(
        store,
        StoreRequest::Update {
            tab_id: "tab_customers".into(),
            patch: TabPatch::rows(vec![]),
            write: WriteKind::Save,
        },
        tx,
    );
    let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(
        msg.kind,
        LoadKind::Update {
            tab_id: "tab_customers".into(),
            write: WriteKind::Save
        }
    );
    assert!(matches!(msg.outcome, Ok(StoreReply::Done)));
}

#[test]
fn describe_summarizes_patch() {
    let req = StoreRequest::Update {
        tab_id: "t1".into(),
        patch: TabPatch {
            name: Some("x".into()),
            rows: Some(vec![]),
            ..Default::default()
        },
        write: WriteKind::Structure,
    };
    assert_eq!(req.describe(), "update t1 (Structure: name, 0 rows)");
}
