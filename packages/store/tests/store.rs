use std::fs;
use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use docshelf_store::{Options, Store, StoreError};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
struct Address {
    city: String,
    state: String,
    country: String,
    pincode: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
struct User {
    name: String,
    age: u32,
    contact: String,
    company: String,
    address: Address,
}

fn sample_user(name: &str, age: u32) -> User {
    User {
        name: name.to_string(),
        age,
        contact: "555-0100".to_string(),
        company: "Initech".to_string(),
        address: Address {
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            country: "US".to_string(),
            pincode: "62701".to_string(),
        },
    }
}

fn open_temp_store() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path(), Options::default()).unwrap();
    (dir, store)
}

#[test]
fn test_write_read_roundtrip() {
    let (_dir, store) = open_temp_store();
    let alice = sample_user("alice", 30);

    store.write("users", "alice", &alice).unwrap();
    let read_back: User = store.read("users", "alice").unwrap();

    assert_eq!(read_back, alice);
}

#[test]
fn test_overwrite_leaves_only_second_value_and_no_temp_file() {
    let (dir, store) = open_temp_store();

    store.write("users", "alice", &sample_user("alice", 30)).unwrap();
    store.write("users", "alice", &sample_user("alice", 31)).unwrap();

    let read_back: User = store.read("users", "alice").unwrap();
    assert_eq!(read_back.age, 31);

    // Exactly one file in the collection and no .tmp residue.
    let names: Vec<String> = fs::read_dir(dir.path().join("users"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["alice.json".to_string()]);
}

#[test]
fn test_read_all_returns_every_document() {
    let (_dir, store) = open_temp_store();
    let alice = sample_user("alice", 30);
    let bob = sample_user("bob", 25);

    store.write("users", "alice", &alice).unwrap();
    store.write("users", "bob", &bob).unwrap();

    let documents = store.read_all("users").unwrap();
    assert_eq!(documents.len(), 2);

    // Order is filesystem-dependent; decode and match by name.
    let mut decoded: Vec<User> = documents
        .iter()
        .map(|raw| serde_json::from_str(raw).unwrap())
        .collect();
    decoded.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(decoded, vec![alice, bob]);
}

#[test]
fn test_read_all_missing_collection_is_not_found() {
    let (_dir, store) = open_temp_store();

    let err = store.read_all("nope").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_empty_names_rejected_without_filesystem_mutation() {
    let (dir, store) = open_temp_store();
    let user = sample_user("alice", 30);

    assert!(matches!(
        store.write("", "alice", &user),
        Err(StoreError::MissingCollection)
    ));
    assert!(matches!(
        store.write("users", "", &user),
        Err(StoreError::MissingResource)
    ));
    assert!(matches!(
        store.read::<User>("", "alice"),
        Err(StoreError::MissingCollection)
    ));
    assert!(matches!(
        store.read::<User>("users", ""),
        Err(StoreError::MissingResource)
    ));
    assert!(matches!(
        store.read_all(""),
        Err(StoreError::MissingCollection)
    ));
    assert!(matches!(
        store.delete("", "alice"),
        Err(StoreError::MissingCollection)
    ));
    // Collection-level delete of a collection that never existed.
    assert!(matches!(
        store.delete("users", ""),
        Err(StoreError::NotFound { .. })
    ));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_delete_record_then_collection() {
    let (dir, store) = open_temp_store();

    store.write("users", "alice", &sample_user("alice", 30)).unwrap();
    store.write("users", "bob", &sample_user("bob", 25)).unwrap();

    store.delete("users", "alice").unwrap();
    assert!(!dir.path().join("users/alice.json").exists());
    assert!(dir.path().join("users/bob.json").exists());

    store.delete("users", "").unwrap();
    assert!(!dir.path().join("users").exists());
}

#[test]
fn test_concurrent_writes_to_one_collection_each_commit_a_complete_document() {
    let (_dir, store) = open_temp_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .write("users", &format!("user{}", i), &sample_user(&format!("user{}", i), i))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let documents = store.read_all("users").unwrap();
    assert_eq!(documents.len(), 8);
    for raw in &documents {
        // Every committed document is complete, valid JSON.
        let user: User = serde_json::from_str(raw).unwrap();
        assert!(user.name.starts_with("user"));
    }
}

#[test]
fn test_concurrent_writes_to_one_resource_leave_exactly_one_input() {
    let (_dir, store) = open_temp_store();
    let store = Arc::new(store);

    let inputs: Vec<User> = (0..8).map(|i| sample_user("alice", i)).collect();

    let handles: Vec<_> = inputs
        .iter()
        .cloned()
        .map(|user| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.write("users", "alice", &user).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // The last committer wins; whichever that was, the document matches one
    // of the inputs byte-for-byte once decoded.
    let survivor: User = store.read("users", "alice").unwrap();
    assert!(inputs.contains(&survivor));
}

#[test]
fn test_writes_to_different_collections_proceed_in_parallel() {
    let (_dir, store) = open_temp_store();
    let store = Arc::new(store);

    // Each thread hammers its own collection; per-collection locking means
    // none of them ever wait on each other.
    let handles: Vec<_> = ["users", "orders", "sessions", "events"]
        .iter()
        .map(|collection| {
            let store = Arc::clone(&store);
            let collection = collection.to_string();
            thread::spawn(move || {
                for i in 0..32 {
                    store
                        .write(&collection, &format!("r{}", i), &sample_user("u", i))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for collection in ["users", "orders", "sessions", "events"] {
        assert_eq!(store.read_all(collection).unwrap().len(), 32);
    }
}

#[test]
fn test_independent_stores_do_not_share_state() {
    let (_dir_a, store_a) = open_temp_store();
    let (_dir_b, store_b) = open_temp_store();

    store_a.write("users", "alice", &sample_user("alice", 30)).unwrap();

    let err = store_b.read::<User>("users", "alice").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_reopen_sees_previous_records() {
    let dir = TempDir::new().unwrap();

    {
        let store = Store::open(dir.path(), Options::default()).unwrap();
        store.write("users", "alice", &sample_user("alice", 30)).unwrap();
    }

    let reopened = Store::open(dir.path(), Options::default()).unwrap();
    let alice: User = reopened.read("users", "alice").unwrap();
    assert_eq!(alice.age, 30);
}
