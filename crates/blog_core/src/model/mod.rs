//! Blog domain model.
//!
//! # Responsibility
//! - Define the record shape exchanged between service, store adapter and RPC.
//!
//! # Invariants
//! - A `Blog` is only ever built from a store-assigned id plus its fields.
//! - Fields are immutable after creation; no update path exists.

pub mod blog;
