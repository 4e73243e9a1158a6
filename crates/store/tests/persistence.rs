//! End-to-end persistence: write via the store, reopen, read back.

use eventline_core::EventRecord;
use eventline_store::{EventStore, JsonSnapshotStore};
use serde_json::json;
use tempfile::TempDir;

fn gateway(dir: &TempDir) -> Box<JsonSnapshotStore> {
    Box::new(JsonSnapshotStore::new(dir.path().join("events.json")))
}

#[test]
fn write_restart_read_restores_sequence() {
    let dir = TempDir::new().unwrap();

    let mut extra = serde_json::Map::new();
    extra.insert("device".to_string(), json!("mobile"));
    extra.insert("build".to_string(), json!(1042));

    // Phase 1: populate and drop the store.
    {
        let store = EventStore::open(gateway(&dir));
        store
            .append(EventRecord::new("alice", "login", "2024-01-01T08:00:00", "s1"))
            .unwrap();
        store
            .append(
                EventRecord::new("bob", "click", "2024-01-01T08:05:00", "s2")
                    .with_extra(extra.clone()),
            )
            .unwrap();
    }

    // Phase 2: reopen and verify order and extra fields survived.
    {
        let store = EventStore::open(gateway(&dir));
        let all = store.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].user_id, "alice");
        assert_eq!(all[1].user_id, "bob");
        assert_eq!(all[1].extra, extra);
    }
}

#[test]
fn corrupt_snapshot_opens_empty_and_recovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("events.json");
    std::fs::write(&path, b"[{\"user_id\": truncated").unwrap();

    let store = EventStore::open(Box::new(JsonSnapshotStore::new(&path)));
    assert!(store.is_empty());

    // The next mutation overwrites the corrupt file with a valid snapshot.
    store
        .append(EventRecord::new("carol", "view", "2024-02-02T00:00:00", "s3"))
        .unwrap();

    let reopened = EventStore::open(Box::new(JsonSnapshotStore::new(&path)));
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.all()[0].user_id, "carol");
}

#[test]
fn clear_persists_emptiness_across_restart() {
    let dir = TempDir::new().unwrap();

    {
        let store = EventStore::open(gateway(&dir));
        store
            .append(EventRecord::new("alice", "login", "t", "s"))
            .unwrap();
        store.clear().unwrap();
    }

    let store = EventStore::open(gateway(&dir));
    assert!(store.is_empty());
}
