//! Credential store lifecycle tests.
//!
//! These drive `FileCredentialStore` through the public API only: save,
//! load, clear, and what a second user scope sees.

use alidns_credentials::{CredentialStore, FileCredentialStore, LoadOutcome, StoreState};
use alidns_integration_tests::{credentials_path, scope_for, store_for};
use tempfile::TempDir;

#[test]
fn test_save_load_clear_scenario() {
    let (store, _dir) = store_for("alice");

    store.save("LTAI_example_id", "SecretValue123!").unwrap();
    assert_eq!(
        store.load().into_pair(),
        ("LTAI_example_id".to_string(), "SecretValue123!".to_string())
    );

    store.clear();
    assert_eq!(store.load().into_pair(), (String::new(), String::new()));
}

#[test]
fn test_roundtrip_non_ascii_and_empty() {
    let (store, _dir) = store_for("alice");

    let cases = [
        ("LTAI_测试", "密钥🔑 with spaces"),
        ("", ""),
        ("id-only", ""),
        ("", "secret-only"),
    ];
    for (identifier, secret) in cases {
        store.save(identifier, secret).unwrap();
        assert_eq!(
            store.load().into_pair(),
            (identifier.to_string(), secret.to_string()),
            "pair ({identifier:?}, {secret:?})"
        );
    }
}

#[test]
fn test_fresh_environment_loads_empty_pair() {
    let (store, _dir) = store_for("alice");
    assert_eq!(store.status(), StoreState::Absent);
    assert_eq!(store.load().into_pair(), (String::new(), String::new()));
}

#[test]
fn test_clear_is_idempotent() {
    let (store, _dir) = store_for("alice");
    store.clear();
    store.save("id", "secret").unwrap();
    store.clear();
    store.clear();
    assert_eq!(store.status(), StoreState::Absent);
}

#[test]
fn test_garbage_file_falls_back_deterministically() {
    let (store, dir) = store_for("alice");
    let path = credentials_path(&dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    for garbage in [&b""[..], b"\x00\x01\x02", b"[1, 2, 3]", b"{\"AccessKeyId\": 42}"] {
        std::fs::write(&path, garbage).unwrap();
        let first = store.load();
        let second = store.load();
        assert_eq!(first, second);
        assert_eq!(first.state(), StoreState::PresentInvalid);
        assert_eq!(first.into_pair(), (String::new(), String::new()));
    }
}

#[test]
fn test_other_user_cannot_read_secret() {
    let (alice, dir) = store_for("alice");
    alice.save("LTAI_example_id", "SecretValue123!").unwrap();

    let bob = FileCredentialStore::new(credentials_path(&dir), scope_for("bob"));
    let outcome = bob.load();
    assert!(matches!(outcome, LoadOutcome::Unreadable { .. }));
    // The identifier is not secret and still pre-fills.
    assert_eq!(
        outcome.into_pair(),
        ("LTAI_example_id".to_string(), String::new())
    );

    // Bob saving over it makes the file his.
    bob.save("LTAI_bob", "bob-secret").unwrap();
    assert_eq!(bob.status(), StoreState::PresentValid);
    assert_eq!(alice.status(), StoreState::PresentInvalid);
}

#[test]
fn test_save_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("config.json");
    let store = FileCredentialStore::new(path.clone(), scope_for("alice"));

    store.save("id", "secret").unwrap();
    assert!(path.exists());
}

#[test]
fn test_file_layout_is_stable() {
    let (store, dir) = store_for("alice");
    store.save("LTAI_example_id", "SecretValue123!").unwrap();

    let raw = std::fs::read_to_string(credentials_path(&dir)).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = doc.as_object().unwrap();

    assert_eq!(object.len(), 2);
    assert_eq!(object["AccessKeyId"], "LTAI_example_id");
    assert!(object["AccessKeySecret"].is_string());
    // Pretty-printed.
    assert!(raw.contains('\n'));
}
