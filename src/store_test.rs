use super::*;

#[test]
fn empty_store_loads_none() {
    let store = MemoryStore::new();
    assert!(store.load("canvasElements").unwrap().is_none());
}

#[test]
fn save_then_load() {
    let mut store = MemoryStore::new();
    store.save("canvasElements", "[]").unwrap();
    assert_eq!(store.load("canvasElements").unwrap().as_deref(), Some("[]"));
    assert_eq!(store.writes(), 1);
}

#[test]
fn save_replaces_previous_payload() {
    let mut store = MemoryStore::with_entry("k", "old");
    store.save("k", "new").unwrap();
    assert_eq!(store.get("k"), Some("new"));
    assert!(store.get("other").is_none());
}

#[test]
fn error_messages_name_the_failure() {
    let e = StoreError::Rejected("quota exceeded".into());
    assert_eq!(e.to_string(), "snapshot write rejected: quota exceeded");
}
