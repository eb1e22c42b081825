//! End-to-end tests for the persisted mask-mode switch.
//!
//! These tests exercise:
//! - the masked default and in-memory writes,
//! - persistence through `FileStore` across reloads, and
//! - recovery from unreadable persisted state.

use std::{fs, sync::Arc};

use adminmask::{
    Email, FileStore, Identifier, KeyValueStore, MASK_STORAGE_KEY, MaskMode, MemoryStore,
    StoreError,
};
use tracing_test::traced_test;

/// Loads nothing and refuses every write.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn save(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
        })
    }
}

#[test]
fn fresh_store_starts_masked() {
    let dir = tempfile::tempdir().unwrap();
    let mode = MaskMode::load(FileStore::new(dir.path()));
    assert!(mode.is_masked());
}

#[test]
fn toggling_twice_restores_the_original_value() {
    let mode = MaskMode::in_memory();
    let before = mode.is_masked();
    mode.toggle().unwrap();
    mode.toggle().unwrap();
    assert_eq!(mode.is_masked(), before);
}

#[test]
fn set_masked_is_visible_immediately() {
    let mode = MaskMode::in_memory();
    mode.set_masked(false).unwrap();
    assert!(!mode.is_masked());
    mode.set_masked(false).unwrap();
    assert!(!mode.is_masked());
}

#[test]
fn file_store_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mode = MaskMode::load(FileStore::new(dir.path()));
    mode.set_masked(false).unwrap();
    drop(mode);

    let reloaded = MaskMode::load(FileStore::new(dir.path()));
    assert!(!reloaded.is_masked());

    let raw = fs::read_to_string(dir.path().join(format!("{MASK_STORAGE_KEY}.json"))).unwrap();
    assert_eq!(raw, r#"{"state":{"isMasked":false},"version":0}"#);
}

#[test]
fn existing_dashboard_state_rehydrates() {
    let store = MemoryStore::new();
    store
        .save(MASK_STORAGE_KEY, r#"{"state":{"isMasked":false},"version":0}"#)
        .unwrap();
    assert!(!MaskMode::load(store).is_masked());
}

#[test]
#[traced_test]
fn corrupt_state_falls_back_to_masked() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(format!("{MASK_STORAGE_KEY}.json")), "{not json").unwrap();

    let mode = MaskMode::load(FileStore::new(dir.path()));
    assert!(mode.is_masked());
    assert!(logs_contain("discarding unreadable mask mode state"));

    mode.set_masked(false).unwrap();
    assert!(!MaskMode::load(FileStore::new(dir.path())).is_masked());
}

#[test]
#[traced_test]
fn failed_persistence_is_returned_but_keeps_the_new_value() {
    let mode = MaskMode::load(ReadOnlyStore);
    assert!(mode.is_masked());

    assert!(matches!(
        mode.set_masked(false),
        Err(StoreError::InvalidKey { .. })
    ));
    assert!(!mode.is_masked());

    assert!(mode.toggle().is_err());
    assert!(mode.is_masked());
    assert!(logs_contain("failed to persist mask mode"));
}

#[test]
fn custom_key_is_isolated() {
    let store = Arc::new(MemoryStore::new());
    let admin = MaskMode::load_with_key(Arc::clone(&store), "support-mask-storage");
    admin.set_masked(false).unwrap();

    assert!(MaskMode::load(Arc::clone(&store)).is_masked());
    assert!(!MaskMode::load_with_key(store, "support-mask-storage").is_masked());
}

#[test]
fn shared_mode_drives_display() {
    let mode = Arc::new(MaskMode::in_memory());
    let view = Arc::clone(&mode);

    assert_eq!(view.display::<Identifier>(Some("abcdefghijkl")), "abcd...ijkl");
    mode.set_masked(false).unwrap();
    assert_eq!(view.display::<Identifier>(Some("abcdefghijkl")), "abcdefghijkl");
    assert_eq!(view.display::<Email>(Some("")), "N/A");
}

#[test]
fn invalid_key_is_rejected_by_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    assert!(store.save("../escape", "{}").is_err());
    assert!(store.load("nested/key").is_err());
}
