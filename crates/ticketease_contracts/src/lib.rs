#![forbid(unsafe_code)]

pub mod account;
pub mod common;
pub mod ticket;

pub use common::{ContractViolation, SchemaVersion, Validate, WallClockMs};
