//! Store adapter contracts and implementations.
//!
//! # Responsibility
//! - Define the data access contract the blog service depends on.
//! - Isolate document-store and identifier-encoding details from the service.
//!
//! # Invariants
//! - Adapter APIs return classified errors (`MalformedId`, `NotFound`,
//!   `Storage`), never raw store errors.
//! - Malformed identifiers are rejected before any store call.

pub mod blog_repo;
