//! Blog store adapter over a document collection.
//!
//! # Responsibility
//! - Persist blog fields as one document and return the store-assigned id.
//! - Look up one blog by the portable (hex) form of its id.
//!
//! # Invariants
//! - Holds no state besides the shared store handle and collection name.
//! - `find_blog` decodes the id first and fails fast without touching the store.

use crate::db::{DbError, DocumentStore, ObjectId, ObjectIdError};
use crate::model::blog::BlogFields;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Collection used when callers do not configure one.
pub const DEFAULT_COLLECTION: &str = "blog";

pub type RepoResult<T> = Result<T, RepoError>;

/// Classified outcome of a failed adapter call.
#[derive(Debug)]
pub enum RepoError {
    /// Identifier string does not decode to a native id.
    MalformedId(ObjectIdError),
    /// Identifier is well formed but no document matches.
    NotFound(ObjectId),
    /// Connectivity, IO or unexpected store-side failure.
    Storage(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedId(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "blog not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedId(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ObjectIdError> for RepoError {
    fn from(value: ObjectIdError) -> Self {
        Self::MalformedId(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

/// Adapter interface between the blog service and its document store.
pub trait BlogRepository {
    /// Persists one new blog document; the store assigns its id.
    fn insert_blog(&self, fields: &BlogFields) -> RepoResult<ObjectId>;
    /// Finds one blog by the hex form of its id.
    fn find_blog(&self, id: &str) -> RepoResult<(ObjectId, BlogFields)>;
}

impl<R: BlogRepository + ?Sized> BlogRepository for Arc<R> {
    fn insert_blog(&self, fields: &BlogFields) -> RepoResult<ObjectId> {
        (**self).insert_blog(fields)
    }

    fn find_blog(&self, id: &str) -> RepoResult<(ObjectId, BlogFields)> {
        (**self).find_blog(id)
    }
}

/// SQLite document-store backed blog repository.
#[derive(Debug, Clone)]
pub struct SqliteBlogRepository {
    store: Arc<DocumentStore>,
    collection: String,
}

impl SqliteBlogRepository {
    /// Creates an adapter over the default `blog` collection.
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::with_collection(store, DEFAULT_COLLECTION)
    }

    pub fn with_collection(store: Arc<DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }
}

impl BlogRepository for SqliteBlogRepository {
    fn insert_blog(&self, fields: &BlogFields) -> RepoResult<ObjectId> {
        let id = self.store.collection(&self.collection).insert_one(fields)?;
        Ok(id)
    }

    fn find_blog(&self, id: &str) -> RepoResult<(ObjectId, BlogFields)> {
        let object_id = ObjectId::parse_str(id)?;

        match self
            .store
            .collection(&self.collection)
            .find_one_by_id::<BlogFields>(&object_id)?
        {
            Some(fields) => Ok((object_id, fields)),
            None => Err(RepoError::NotFound(object_id)),
        }
    }
}
