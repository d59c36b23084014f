#![forbid(unsafe_code)]

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::kv::KvStore;

/// Which accessor operation swallowed a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultOp {
    Read,
    Write,
}

/// One swallowed storage failure. Rows are append-only until drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFault {
    pub op: FaultOp,
    pub key: String,
    pub reason: String,
}

/// Fail-soft JSON tier over a raw store. No method returns an error:
/// undecodable state degrades to an empty read, an unwritable value is
/// dropped with the previous value intact, and every swallowed failure is
/// recorded in the fault ledger.
#[derive(Debug)]
pub struct StoreAccessor<S: KvStore> {
    store: S,
    faults: Vec<StoreFault>,
}

impl<S: KvStore> StoreAccessor<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            faults: Vec::new(),
        }
    }

    /// Decoded sequence under `key`. Absent or undecodable values read as
    /// empty. A decoded object that is not an array is returned as a
    /// one-element sequence (legacy shape kept for stored single records);
    /// decoded primitives read as empty.
    pub fn get(&mut self, key: &str) -> Vec<Value> {
        let Some(raw) = self.store.read_raw(key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(Value::Object(map)) => vec![Value::Object(map)],
            Ok(_) => Vec::new(),
            Err(err) => {
                self.record(FaultOp::Read, key, format!("undecodable value: {err}"));
                Vec::new()
            }
        }
    }

    /// `get`, then a typed decode per element. Elements that do not decode
    /// as `T` are skipped and recorded.
    pub fn get_records<T: DeserializeOwned>(&mut self, key: &str) -> Vec<T> {
        let items = self.get(key);
        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<T>(item) {
                Ok(row) => rows.push(row),
                Err(err) => {
                    self.record(FaultOp::Read, key, format!("undecodable element: {err}"));
                }
            }
        }
        rows
    }

    /// Single decoded record under `key`, when present and decodable.
    pub fn get_record<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = self.store.read_raw(key)?;
        match serde_json::from_str::<T>(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                self.record(FaultOp::Read, key, format!("undecodable value: {err}"));
                None
            }
        }
    }

    /// JSON-encode `value` and overwrite `key` in full.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                self.record(FaultOp::Write, key, format!("unencodable value: {err}"));
                return;
            }
        };
        if let Err(err) = self.store.write_raw(key, encoded) {
            self.record(FaultOp::Write, key, err.to_string());
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.store.remove_raw(key);
    }

    /// Raw presence check; decodability is not required.
    pub fn contains(&self, key: &str) -> bool {
        self.store.read_raw(key).is_some()
    }

    pub fn faults(&self) -> &[StoreFault] {
        &self.faults
    }

    pub fn take_faults(&mut self) -> Vec<StoreFault> {
        std::mem::take(&mut self.faults)
    }

    fn record(&mut self, op: FaultOp, key: &str, reason: String) {
        self.faults.push(StoreFault {
            op,
            key: key.to_string(),
            reason,
        });
    }
}
