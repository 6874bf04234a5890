//! Tests for Store
//!
//! These tests verify:
//! - Lazy creation of the store file
//! - Existence checks by CPF (header-then-skip)
//! - Scans in insertion order
//! - Truncated tail handling

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use personkv::record::{encode, Person};
use personkv::store::Store;
use personkv::PersonKvError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("people.bin");
    (temp_dir, path)
}

fn person(cpf: &str, name: &str) -> Person {
    Person::new(cpf, name, "01/01/2000", "11999990000").unwrap()
}

fn append_all(store: &Store, people: &[Person]) {
    for p in people {
        store.append(&encode(p).unwrap()).unwrap();
    }
}

// =============================================================================
// Open/Create Tests
// =============================================================================

#[test]
fn test_open_does_not_create_file() {
    let (_temp, path) = setup_temp_store();

    let store = Store::open(&path);

    assert!(!path.exists());
    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.len_bytes().unwrap(), 0);
}

#[test]
fn test_append_creates_file() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);

    append_all(&store, &[person("11122233344", "Ana")]);

    assert!(path.exists());
    assert_eq!(store.len_bytes().unwrap(), 36);
}

#[test]
fn test_append_grows_monotonically() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);

    let first = encode(&person("11122233344", "Ana")).unwrap();
    let second = encode(&person("55566677788", "Bruno")).unwrap();
    store.append(&first).unwrap();
    store.append(&second).unwrap();

    let contents = fs::read(&path).unwrap();
    assert_eq!(contents, [first, second].concat());
}

#[test]
fn test_append_missing_directory_is_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open(temp_dir.path().join("missing").join("people.bin"));

    match store.append(b"11122233344") {
        Err(PersonKvError::StoreUnavailable { .. }) => {}
        other => panic!("Expected StoreUnavailable, got {:?}", other),
    }
}

// =============================================================================
// Exists Tests
// =============================================================================

#[test]
fn test_exists_missing_store() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);

    assert!(!store.exists(b"11122233344").unwrap());
}

#[test]
fn test_exists_empty_store() {
    let (_temp, path) = setup_temp_store();
    fs::File::create(&path).unwrap();
    let store = Store::open(&path);

    assert!(!store.exists(b"11122233344").unwrap());
}

#[test]
fn test_exists_finds_every_record() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);

    // Names of different lengths exercise the skip arithmetic
    append_all(
        &store,
        &[
            person("00000000001", ""),
            person("00000000002", "A"),
            person("00000000003", &"x".repeat(255)),
            person("00000000004", "Maria"),
        ],
    );

    assert!(store.exists(b"00000000001").unwrap());
    assert!(store.exists(b"00000000002").unwrap());
    assert!(store.exists(b"00000000003").unwrap());
    assert!(store.exists(b"00000000004").unwrap());
    assert!(!store.exists(b"00000000005").unwrap());
}

#[test]
fn test_exists_does_not_match_inside_other_fields() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);

    // The phone of the first record equals the CPF we look for
    let mut p = person("11122233344", "Ana");
    p.phone = *b"99988877766";
    append_all(&store, &[p]);

    assert!(!store.exists(b"99988877766").unwrap());
}

#[test]
fn test_exists_compares_all_bytes() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);

    let mut p = person("11122233344", "Ana");
    p.cpf = *b"111\0\0\0\0\0\0\0\0";
    append_all(&store, &[p]);

    assert!(!store.exists(b"111\0\0\0\0\0\0\0X").unwrap());
    assert!(store.exists(b"111\0\0\0\0\0\0\0\0").unwrap());
}

#[test]
fn test_exists_with_truncated_tail() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);
    append_all(&store, &[person("11122233344", "Ana")]);

    let partial = encode(&person("55566677788", "Bruno")).unwrap();
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(&partial[..5]).unwrap();

    assert!(store.exists(b"11122233344").unwrap());
    assert!(!store.exists(b"55566677788").unwrap());
}

// =============================================================================
// Scan Tests
// =============================================================================

#[test]
fn test_scan_missing_store_is_empty() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);

    assert_eq!(store.scan().unwrap().count(), 0);
}

#[test]
fn test_scan_in_insertion_order() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);
    let people = vec![
        person("33333333333", "Carla"),
        person("11111111111", "Ana"),
        person("22222222222", "Bruno"),
    ];
    append_all(&store, &people);

    let scanned: Vec<Person> = store.scan().unwrap().map(|r| r.unwrap()).collect();

    assert_eq!(scanned, people);
}

#[test]
fn test_scan_restarts_from_beginning() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);
    append_all(&store, &[person("11111111111", "Ana"), person("22222222222", "Bruno")]);

    let mut first = store.scan().unwrap();
    assert_eq!(first.next().unwrap().unwrap().name, b"Ana");

    let second: Vec<Person> = store.scan().unwrap().map(|r| r.unwrap()).collect();
    assert_eq!(second.len(), 2);
}

#[test]
fn test_scan_truncated_tail_ends_without_error() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);
    append_all(&store, &[person("11111111111", "Ana"), person("22222222222", "Bruno")]);

    // Declared length is longer than what is left in the file
    let partial = encode(&person("33333333333", "Carla")).unwrap();
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(&partial[..partial.len() - 3]).unwrap();

    let results: Vec<_> = store.scan().unwrap().collect();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.is_ok()));
}

#[test]
fn test_scan_partial_header_ends_without_error() {
    let (_temp, path) = setup_temp_store();
    let store = Store::open(&path);
    append_all(&store, &[person("11111111111", "Ana")]);

    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(b"222").unwrap();

    let scanned: Vec<Person> = store.scan().unwrap().map(|r| r.unwrap()).collect();
    assert_eq!(scanned, vec![person("11111111111", "Ana")]);
}
