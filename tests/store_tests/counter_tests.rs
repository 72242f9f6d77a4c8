//! Tests for atomic counters
//!
//! These tests verify:
//! - increment_i32 / increment_i64 semantics (absent baseline, deltas, wrap)
//! - No lost updates under concurrent increments
//! - Failures are returned and never leave a half-written counter

use std::sync::{Arc, Barrier};
use std::thread;

use pathkv::codec::{encode_i32, encode_i64};
use pathkv::{PathKvError, Registry, Store};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_path(temp_dir.path()).unwrap();
    (temp_dir, store)
}

// =============================================================================
// Basic Increment Tests
// =============================================================================

#[test]
fn test_increment_absent_key_starts_at_zero() {
    let (_temp, store) = setup_temp_store();

    assert_eq!(store.increment_i64("counter", 5).unwrap(), 5);
    assert_eq!(store.increment_i32("small", 3).unwrap(), 3);
}

#[test]
fn test_increment_returns_new_value() {
    let (_temp, store) = setup_temp_store();

    assert_eq!(store.increment_i64("counter", 1).unwrap(), 1);
    assert_eq!(store.increment_i64("counter", 1).unwrap(), 2);
    assert_eq!(store.increment_i64("counter", 10).unwrap(), 12);
    assert_eq!(store.increment_i64("counter", -20).unwrap(), -8);
}

#[test]
fn test_increment_persists_fixed_width_encoding() {
    let (_temp, store) = setup_temp_store();

    store.increment_i32("int_counter", 7).unwrap();
    store.increment_i64("long_counter", 7).unwrap();

    assert_eq!(store.get(b"int_counter").unwrap(), Some(encode_i32(7)));
    assert_eq!(store.get(b"long_counter").unwrap(), Some(encode_i64(7)));
    assert_eq!(store.get_scalar::<i64>(b"long_counter").unwrap(), Some(7));
}

#[test]
fn test_increment_continues_from_existing_value() {
    let (_temp, store) = setup_temp_store();

    store.put_scalar(b"counter", &100i32).unwrap();

    assert_eq!(store.increment_i32("counter", 1).unwrap(), 101);
}

#[test]
fn test_increment_accepts_byte_keys() {
    let (_temp, store) = setup_temp_store();

    let key = [0x00u8, 0xFF, 0x10];
    assert_eq!(store.increment_i64(key, 2).unwrap(), 2);
    assert_eq!(store.increment_i64(&key[..], 2).unwrap(), 4);
}

#[test]
fn test_increment_i32_wraps_on_overflow() {
    let (_temp, store) = setup_temp_store();

    store.put_scalar(b"counter", &i32::MAX).unwrap();

    assert_eq!(store.increment_i32("counter", 1).unwrap(), i32::MIN);
}

#[test]
fn test_increment_i64_wraps_on_overflow() {
    let (_temp, store) = setup_temp_store();

    store.put_scalar(b"counter", &i64::MIN).unwrap();

    assert_eq!(store.increment_i64("counter", -1).unwrap(), i64::MAX);
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_increment_empty_key_rejected() {
    let (_temp, store) = setup_temp_store();

    assert!(matches!(
        store.increment_i64("", 1),
        Err(PathKvError::InvalidInput(_))
    ));
    assert_eq!(store.get(b"").unwrap(), None);
}

#[test]
fn test_increment_wrong_width_fails_without_write() {
    let (_temp, store) = setup_temp_store();

    // An i32 counter read as i64
    store.increment_i32("counter", 9).unwrap();

    assert!(matches!(
        store.increment_i64("counter", 1),
        Err(PathKvError::Decode(_))
    ));
    assert_eq!(store.get_scalar::<i32>(b"counter").unwrap(), Some(9));
}

#[test]
fn test_increment_after_close_fails() {
    let (_temp, store) = setup_temp_store();

    store.close().unwrap();

    assert!(matches!(
        store.increment_i32("counter", 1),
        Err(PathKvError::Closed(_))
    ));
}

#[test]
fn test_counter_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = Store::open_path(temp_dir.path()).unwrap();
        store.increment_i64("visits", 41).unwrap();
        store.close().unwrap();
    }

    let store = Store::open_path(temp_dir.path()).unwrap();
    assert_eq!(store.increment_i64("visits", 1).unwrap(), 42);
}

// =============================================================================
// Concurrent Increment Tests
// =============================================================================

#[test]
fn test_concurrent_increments_through_registry() {
    const WORKERS: usize = 5;
    const INCREMENTS: usize = 1000;

    let temp_dir = TempDir::new().unwrap();
    let registry = Arc::new(Registry::new());
    let path = temp_dir.path().join("db");

    // Every worker fetches its own handle, like independent services would
    let mut handles = vec![];
    for _ in 0..WORKERS {
        let registry = Arc::clone(&registry);
        let path = path.clone();
        handles.push(thread::spawn(move || {
            let store = registry.get_handle(&path).unwrap();
            for _ in 0..INCREMENTS {
                store.increment_i64("counter", 1).unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let store = registry.get_handle(&path).unwrap();
    assert_eq!(
        store.get_scalar::<i64>(b"counter").unwrap(),
        Some((WORKERS * INCREMENTS) as i64)
    );
}

#[test]
fn test_concurrent_i32_increments_mixed_keys() {
    const WORKERS: usize = 4;
    const INCREMENTS: i32 = 500;

    let (_temp, store) = setup_temp_store();
    let store = Arc::new(store);
    let barrier = Arc::new(Barrier::new(WORKERS));

    let mut handles = vec![];
    for worker in 0..WORKERS {
        let store = Arc::clone(&store);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..INCREMENTS {
                store.increment_i32("shared", 1).unwrap();
                store.increment_i32(format!("own{}", worker), 2).unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        store.get_scalar::<i32>(b"shared").unwrap(),
        Some(WORKERS as i32 * INCREMENTS)
    );
    for worker in 0..WORKERS {
        let key = format!("own{}", worker);
        assert_eq!(
            store.get_scalar::<i32>(key.as_bytes()).unwrap(),
            Some(2 * INCREMENTS)
        );
    }
}

#[test]
fn test_returned_values_are_unique() {
    const WORKERS: usize = 4;
    const INCREMENTS: usize = 250;

    let (_temp, store) = setup_temp_store();
    let store = Arc::new(store);

    let mut handles = vec![];
    for _ in 0..WORKERS {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            (0..INCREMENTS)
                .map(|_| store.increment_i64("ticket", 1).unwrap())
                .collect::<Vec<i64>>()
        }));
    }

    let mut seen: Vec<i64> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    seen.sort_unstable();

    let expected: Vec<i64> = (1..=(WORKERS * INCREMENTS) as i64).collect();
    assert_eq!(seen, expected);
}
