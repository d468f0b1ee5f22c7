//! Schemaless collection view over the `documents` table.
//!
//! # Responsibility
//! - Insert one JSON document and assign its native identifier.
//! - Find one document by native identifier.
//!
//! # Invariants
//! - Identifiers are generated here, never supplied by callers.
//! - An insert either stores the whole document or nothing.
//! - An identifier collision fails the insert instead of overwriting.

use super::{DbResult, DocumentStore, ObjectId};
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Borrowed view over one named collection of a `DocumentStore`.
#[derive(Debug, Clone, Copy)]
pub struct Collection<'store> {
    store: &'store DocumentStore,
    name: &'store str,
}

impl<'store> Collection<'store> {
    pub(crate) fn new(store: &'store DocumentStore, name: &'store str) -> Self {
        Self { store, name }
    }

    /// Serializes `document` and stores it under a freshly generated id.
    pub fn insert_one<T: Serialize>(&self, document: &T) -> DbResult<ObjectId> {
        let body = serde_json::to_string(document)?;
        let id = ObjectId::new();

        let conn = self.store.lock()?;
        conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3);",
            params![self.name, id.bytes().as_slice(), body],
        )?;

        Ok(id)
    }

    /// Loads and decodes the document stored under `id`, if any.
    pub fn find_one_by_id<T: DeserializeOwned>(&self, id: &ObjectId) -> DbResult<Option<T>> {
        let body: Option<String> = {
            let conn = self.store.lock()?;
            conn.query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2;",
                params![self.name, id.bytes().as_slice()],
                |row| row.get(0),
            )
            .optional()?
        };

        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    /// Number of documents in this collection.
    pub fn count(&self) -> DbResult<u64> {
        let conn = self.store.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1;",
            [self.name],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
