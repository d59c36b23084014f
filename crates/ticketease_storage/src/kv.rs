#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Raw-tier storage failure. The typed accessor swallows these; callers of
/// the raw tier see them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvError {
    QuotaExceeded {
        key: String,
        attempted_bytes: usize,
        quota_bytes: usize,
    },
}

impl fmt::Display for KvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KvError::QuotaExceeded {
                key,
                attempted_bytes,
                quota_bytes,
            } => write!(
                f,
                "quota exceeded writing {key}: {attempted_bytes} of {quota_bytes} bytes"
            ),
        }
    }
}

/// Raw string key-value storage, the seam the browser storage area sits
/// behind. Reads and removes cannot fail; writes may hit the quota.
pub trait KvStore {
    fn read_raw(&self, key: &str) -> Option<String>;
    fn write_raw(&mut self, key: &str, value: String) -> Result<(), KvError>;
    fn remove_raw(&mut self, key: &str);
}

#[derive(Debug, Default)]
struct KvArea {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl KvArea {
    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

/// In-memory storage area with browser-tab handle semantics: `handle()`
/// yields another view over the same entries, so two handles model two tabs
/// sharing one storage area. Single-threaded by construction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKvStore {
    area: Rc<RefCell<KvArea>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte quota over the sum of key and value lengths, for quota-fault
    /// tests.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            area: Rc::new(RefCell::new(KvArea {
                entries: BTreeMap::new(),
                quota_bytes: Some(quota_bytes),
            })),
        }
    }

    /// Another handle over the same storage area.
    pub fn handle(&self) -> Self {
        Self {
            area: Rc::clone(&self.area),
        }
    }

    pub fn len(&self) -> usize {
        self.area.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.area.borrow().entries.is_empty()
    }
}

impl KvStore for InMemoryKvStore {
    fn read_raw(&self, key: &str) -> Option<String> {
        self.area.borrow().entries.get(key).cloned()
    }

    fn write_raw(&mut self, key: &str, value: String) -> Result<(), KvError> {
        let mut area = self.area.borrow_mut();
        if let Some(quota_bytes) = area.quota_bytes {
            let replaced_bytes = area.entries.get(key).map(String::len).unwrap_or(0);
            let key_bytes = if area.entries.contains_key(key) {
                0
            } else {
                key.len()
            };
            let attempted_bytes = area.used_bytes() - replaced_bytes + key_bytes + value.len();
            if attempted_bytes > quota_bytes {
                return Err(KvError::QuotaExceeded {
                    key: key.to_string(),
                    attempted_bytes,
                    quota_bytes,
                });
            }
        }
        area.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_raw(&mut self, key: &str) {
        self.area.borrow_mut().entries.remove(key);
    }
}
