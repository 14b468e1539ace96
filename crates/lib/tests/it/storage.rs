//! Storage adapter integration tests

use pfeps_session::Error;
use pfeps_session::storage::{InMemory, JsonFile, Storage};

#[test]
fn in_memory_set_get_remove() {
    let store = InMemory::new();
    assert_eq!(store.get("token").unwrap(), None);

    store.set("token", "abc").unwrap();
    assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));

    store.set("token", "def").unwrap();
    assert_eq!(store.get("token").unwrap().as_deref(), Some("def"));

    store.remove("token").unwrap();
    assert_eq!(store.get("token").unwrap(), None);

    // Removing an absent key is a no-op.
    store.remove("token").unwrap();
}

#[test]
fn json_file_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let store = JsonFile::open(&path).unwrap();
        store.set("token", "abc").unwrap();
        store.set("theme", "light").unwrap();
        store.remove("theme").unwrap();
    }

    let store = JsonFile::open(&path).unwrap();
    assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));
    assert_eq!(store.get("theme").unwrap(), None);
}

#[test]
fn json_file_treats_an_absent_file_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFile::open(dir.path().join("missing.json")).unwrap();
    assert_eq!(store.get("token").unwrap(), None);
}

#[test]
fn json_file_reports_a_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "not json at all").unwrap();

    let err = JsonFile::open(&path).unwrap_err();
    assert!(err.is_storage_error());
    match err {
        Error::Storage(inner) => assert!(inner.is_corrupt()),
        other => panic!("unexpected error: {other}"),
    }
}
