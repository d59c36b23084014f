use ticketease_storage::kv::{InMemoryKvStore, KvError, KvStore};

#[test]
fn at_kv_backend_01_handles_share_one_area() {
    let mut tab_a = InMemoryKvStore::new();
    let tab_b = tab_a.handle();

    tab_a.write_raw("tickets", "[]".to_string()).unwrap();

    assert_eq!(tab_b.read_raw("tickets"), Some("[]".to_string()));
    assert_eq!(tab_b.len(), 1);
}

#[test]
fn at_kv_backend_02_write_overwrites_previous_value() {
    let mut store = InMemoryKvStore::new();

    store.write_raw("tickets", "[1]".to_string()).unwrap();
    store.write_raw("tickets", "[1,2]".to_string()).unwrap();

    assert_eq!(store.read_raw("tickets"), Some("[1,2]".to_string()));
    assert_eq!(store.len(), 1);
}

#[test]
fn at_kv_backend_03_quota_rejects_oversized_write_and_keeps_previous() {
    let mut store = InMemoryKvStore::with_quota(16);

    store.write_raw("k", "12345678".to_string()).unwrap();

    let oversized = "0123456789abcdef".to_string();
    assert!(matches!(
        store.write_raw("k", oversized),
        Err(KvError::QuotaExceeded {
            attempted_bytes: 17,
            quota_bytes: 16,
            ..
        })
    ));
    assert_eq!(store.read_raw("k"), Some("12345678".to_string()));
}

#[test]
fn at_kv_backend_04_quota_counts_replaced_value_only_once() {
    let mut store = InMemoryKvStore::with_quota(16);

    store.write_raw("k", "123456789012345".to_string()).unwrap();
    // Replacing a 15-byte value with another 15-byte value stays in quota.
    store.write_raw("k", "abcdefghijklmno".to_string()).unwrap();

    assert_eq!(store.read_raw("k"), Some("abcdefghijklmno".to_string()));
}

#[test]
fn at_kv_backend_05_remove_is_idempotent() {
    let mut store = InMemoryKvStore::new();

    store.write_raw("session", "\"a@b.example\"".to_string()).unwrap();
    store.remove_raw("session");
    store.remove_raw("session");

    assert_eq!(store.read_raw("session"), None);
    assert!(store.is_empty());
}
