#![forbid(unsafe_code)]

pub mod accessor;
pub mod keys;
pub mod kv;

pub use accessor::{FaultOp, StoreAccessor, StoreFault};
pub use keys::StoreKeys;
pub use kv::{InMemoryKvStore, KvError, KvStore};
