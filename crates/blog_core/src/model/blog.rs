//! Blog domain model.
//!
//! # Responsibility
//! - Define the persisted blog record and its pre-creation field set.
//!
//! # Invariants
//! - `Blog::id` is the portable (hex) form of the store-assigned identifier and
//!   is never empty on a value returned by the service.
//! - `author_id`, `title` and `content` are opaque; no validation is applied.

use serde::{Deserialize, Serialize};

/// Caller-supplied fields of a blog, before the store assigns an id.
///
/// This is also the exact body persisted in the document store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogFields {
    pub author_id: String,
    pub title: String,
    pub content: String,
}

impl BlogFields {
    pub fn new(
        author_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id: author_id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// A created blog post.
///
/// Serialized as `{id, author_id, title, content}`, which is also the RPC
/// wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    /// 24-char lowercase hex identifier assigned by the store.
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
}

impl Blog {
    /// Assembles a blog from its store id and persisted fields.
    pub fn new(id: impl Into<String>, fields: BlogFields) -> Self {
        let BlogFields {
            author_id,
            title,
            content,
        } = fields;
        Self {
            id: id.into(),
            author_id,
            title,
            content,
        }
    }

    /// Returns the caller-supplied fields without the id.
    pub fn fields(&self) -> BlogFields {
        BlogFields {
            author_id: self.author_id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}
