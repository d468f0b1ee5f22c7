//! Core domain logic for the blog record service.
//! Owns the record model, the document store, the store adapter and the
//! create/read use cases behind the RPC surface.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod rpc;
pub mod service;

pub use db::{open_store, open_store_in_memory, DbError, DocumentStore, ObjectId, StoreOptions};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::blog::{Blog, BlogFields};
pub use repo::blog_repo::{
    BlogRepository, RepoError, RepoResult, SqliteBlogRepository, DEFAULT_COLLECTION,
};
pub use service::blog_service::{BlogService, ServiceResult};
pub use service::status::{Code, Status};
