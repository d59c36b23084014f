use serde_json::{json, Value};

use ticketease_contracts::account::AccountRecord;
use ticketease_contracts::ticket::{Ticket, TicketDraft, TicketId};
use ticketease_storage::accessor::{FaultOp, StoreAccessor};
use ticketease_storage::kv::{InMemoryKvStore, KvStore};

fn accessor() -> StoreAccessor<InMemoryKvStore> {
    StoreAccessor::new(InMemoryKvStore::new())
}

fn ticket(id: i64, title: &str, created_at: &str) -> Ticket {
    let draft = TicketDraft::v1(title, "", "open").unwrap();
    Ticket::from_draft(&draft, TicketId(id), created_at.to_string())
}

#[test]
fn at_accessor_01_missing_key_reads_empty_without_fault() {
    let mut store = accessor();

    assert!(store.get("tickets").is_empty());
    assert!(store.faults().is_empty());
}

#[test]
fn at_accessor_02_undecodable_value_reads_empty_and_records_fault() {
    let mut backend = InMemoryKvStore::new();
    backend.write_raw("tickets", "{not json".to_string()).unwrap();
    let mut store = StoreAccessor::new(backend);

    assert!(store.get("tickets").is_empty());

    let faults = store.faults();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].op, FaultOp::Read);
    assert_eq!(faults[0].key, "tickets");
}

#[test]
fn at_accessor_03_array_round_trip_preserves_order() {
    let mut store = accessor();
    let rows = vec![json!({"id": 3}), json!({"id": 1}), json!({"id": 2})];

    store.set("tickets", &rows);

    assert_eq!(store.get("tickets"), rows);
    assert!(store.faults().is_empty());
}

#[test]
fn at_accessor_04_single_object_reads_as_one_element() {
    let mut backend = InMemoryKvStore::new();
    backend
        .write_raw("session", "{\"email\":\"a@b.example\"}".to_string())
        .unwrap();
    let mut store = StoreAccessor::new(backend);

    let items = store.get("session");
    assert_eq!(items, vec![json!({"email": "a@b.example"})]);
    assert!(store.faults().is_empty());
}

#[test]
fn at_accessor_05_decoded_primitive_reads_empty_without_fault() {
    let mut backend = InMemoryKvStore::new();
    backend.write_raw("tickets", "42".to_string()).unwrap();
    let mut store = StoreAccessor::new(backend);

    assert!(store.get("tickets").is_empty());
    assert!(store.faults().is_empty());
}

#[test]
fn at_accessor_06_quota_failure_drops_write_and_records_fault() {
    let mut store = StoreAccessor::new(InMemoryKvStore::with_quota(8));

    store.set("tickets", &vec![json!({"id": 1, "title": "too large"})]);

    assert!(store.get("tickets").is_empty());
    let faults = store.faults();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].op, FaultOp::Write);
    assert!(faults[0].reason.contains("quota exceeded"));
}

#[test]
fn at_accessor_07_set_overwrites_whole_value() {
    let mut store = accessor();

    store.set("tickets", &vec![json!({"id": 1})]);
    store.set("tickets", &vec![json!({"id": 2})]);

    assert_eq!(store.get("tickets"), vec![json!({"id": 2})]);
}

#[test]
fn at_accessor_08_typed_rows_skip_undecodable_elements() {
    let mut backend = InMemoryKvStore::new();
    backend
        .write_raw(
            "ticketapp_users",
            "[{\"email\":\"a@b.example\",\"password\":\"secret\"},{\"email\":42}]"
                .to_string(),
        )
        .unwrap();
    let mut store = StoreAccessor::new(backend);

    let rows = store.get_records::<AccountRecord>("ticketapp_users");
    assert_eq!(
        rows,
        vec![AccountRecord {
            email: "a@b.example".to_string(),
            password: "secret".to_string(),
        }]
    );
    assert_eq!(store.faults().len(), 1);
    assert_eq!(store.faults()[0].op, FaultOp::Read);
}

#[test]
fn at_accessor_09_ticket_rows_round_trip_with_contract_field_names() {
    let mut backend = InMemoryKvStore::new();
    let mut store = StoreAccessor::new(backend.handle());
    let rows = vec![
        ticket(1754222400000, "Fix bug", "2026-08-03T12:00:00.000Z"),
        ticket(1754222400001, "Ship it", "2026-08-03T12:00:00.001Z"),
    ];

    store.set("tickets", &rows);

    let raw = backend.read_raw("tickets").unwrap();
    assert!(raw.contains("\"createdAt\""));
    assert!(!raw.contains("\"created_at\""));
    assert!(!raw.contains("\"priority\""));
    assert_eq!(store.get_records::<Ticket>("tickets"), rows);

    backend.remove_raw("tickets");
    assert!(store.get("tickets").is_empty());
}

#[test]
fn at_accessor_10_single_record_reads_session_marker_string() {
    let mut store = accessor();

    store.set("ticketapp_session", &"a@b.example");

    assert_eq!(
        store.get_record::<String>("ticketapp_session"),
        Some("a@b.example".to_string())
    );
    assert!(store.contains("ticketapp_session"));
}

#[test]
fn at_accessor_11_take_faults_drains_the_ledger_in_order() {
    let mut backend = InMemoryKvStore::new();
    backend.write_raw("a", "{bad".to_string()).unwrap();
    backend.write_raw("b", "[oops".to_string()).unwrap();
    let mut store = StoreAccessor::new(backend);

    store.get("a");
    store.get("b");

    let drained = store.take_faults();
    assert_eq!(drained.len(), 2);
    assert_eq!(drained[0].key, "a");
    assert_eq!(drained[1].key, "b");
    assert!(store.faults().is_empty());
}

#[test]
fn at_accessor_12_round_trip_of_arbitrary_values_is_order_stable() {
    let mut store = accessor();
    let rows: Vec<Value> = (0..32).map(|n| json!({"id": n})).collect();

    store.set("tickets", &rows);

    assert_eq!(store.get("tickets"), rows);
}
