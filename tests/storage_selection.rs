//! Backend selection and persistence across manager instances

mod common;

use common::{T, TestClock, create_token};
use jwtstore::*;
use serde_json::json;
use std::sync::Arc;

fn backends() -> (Arc<MemoryStore>, Arc<MemoryStore>, StorageBackends) {
    let session = Arc::new(MemoryStore::new());
    let local = Arc::new(MemoryStore::new());
    let backends = StorageBackends::new(session.clone(), local.clone());
    (session, local, backends)
}

#[test]
fn local_manager_writes_only_to_persistent_backend() {
    let (session, local, backends) = backends();
    let manager = TokenManager::builder("auth")
        .storage_type(StorageType::Local)
        .backends(backends)
        .build();
    let token = create_token(&json!({"sub": "123"}));

    assert_eq!(manager.storage_type(), StorageType::Local);
    manager.set_token(&token).unwrap();

    assert_eq!(local.get("auth").unwrap(), Some(token));
    assert!(session.is_empty());
}

#[test]
fn session_manager_writes_only_to_session_backend() {
    let (session, local, backends) = backends();
    let manager = TokenManager::builder("auth").backends(backends).build();
    let token = create_token(&json!({"sub": "123"}));

    assert_eq!(manager.storage_type(), StorageType::Session);
    manager.set_token(&token).unwrap();

    assert_eq!(session.get("auth").unwrap(), Some(token));
    assert!(local.is_empty());
}

#[test]
fn eviction_only_touches_the_selected_backend() {
    let (session, local, backends) = backends();
    let expired = create_token(&json!({"exp": T - 1}));
    session.set("auth", &expired).unwrap();
    local.set("auth", &expired).unwrap();

    let manager = TokenManager::builder("auth")
        .storage_type(StorageType::Local)
        .backends(backends)
        .clock(move || T)
        .build();

    assert_eq!(manager.read_token(), None);
    assert!(local.is_empty());
    assert_eq!(session.get("auth").unwrap(), Some(expired));
}

#[test]
fn different_keys_do_not_interfere() {
    let store = Arc::new(MemoryStore::new());
    let access = TokenManager::builder("access")
        .session_store(store.clone())
        .build();
    let id = TokenManager::builder("id")
        .session_store(store.clone())
        .build();

    access
        .set_token(&create_token(&json!({"sub": "access"})))
        .unwrap();
    id.set_token(&create_token(&json!({"sub": "id"}))).unwrap();

    assert_eq!(access.subject().as_deref(), Some("access"));
    assert_eq!(id.subject().as_deref(), Some("id"));

    access.clear_token().unwrap();
    assert_eq!(access.read_token(), None);
    assert_eq!(id.subject().as_deref(), Some("id"));
}

#[test]
fn file_store_persists_across_managers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let clock = TestClock::at(T);
    let token = create_token(&json!({"sub": "123", "exp": T + 60}));

    {
        let manager = TokenManager::builder("auth")
            .storage_type(StorageType::Local)
            .local_store(Arc::new(FileStore::open(&path)))
            .clock(clock.source())
            .build();
        manager.set_token(&token).unwrap();
    }

    let reopened = TokenManager::builder("auth")
        .storage_type(StorageType::Local)
        .local_store(Arc::new(FileStore::open(&path)))
        .clock(clock.source())
        .build();
    assert_eq!(reopened.read_token(), Some(token));

    clock.advance(60);
    assert_eq!(reopened.read_token(), None);
    assert_eq!(FileStore::open(&path).get("auth").unwrap(), None);
}

#[test]
fn unreadable_storage_reads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "corrupt").unwrap();

    let manager = TokenManager::builder("auth")
        .storage_type(StorageType::Local)
        .local_store(Arc::new(FileStore::open(&path)))
        .build();

    assert_eq!(manager.read_token(), None);
    assert!(matches!(
        manager.set_token(&create_token(&json!({"sub": "a"}))),
        Err(Error::Storage(_))
    ));
}

#[test]
fn storage_type_parses_from_configuration_strings() {
    let storage_type: StorageType = "local".parse().unwrap();
    let manager = TokenManager::builder("auth")
        .storage_type(storage_type)
        .build();

    assert_eq!(manager.storage_type().to_string(), "local");
}
