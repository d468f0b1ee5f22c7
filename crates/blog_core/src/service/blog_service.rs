//! Blog use-case service.
//!
//! # Responsibility
//! - Implement `CreateBlog` and `ReadBlog` on top of a `BlogRepository`.
//! - Map adapter outcomes to classified `Status` errors.
//!
//! # Invariants
//! - Holds no state besides the adapter; nothing is cached.
//! - A successful create always returns a blog with a non-empty id.
//! - Failures never carry a partially populated blog.
//! - No retries: every adapter failure is surfaced to the caller once.

use crate::model::blog::{Blog, BlogFields};
use crate::repo::blog_repo::{BlogRepository, RepoError};
use crate::service::status::{Code, Status};
use log::{debug, error, info, warn};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, Status>;

/// Blog service facade over an adapter implementation.
pub struct BlogService<R: BlogRepository> {
    repo: R,
}

impl<R: BlogRepository> BlogService<R> {
    /// Creates a service using the provided adapter implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new blog and returns it with its store-assigned id.
    ///
    /// Empty fields are accepted as-is.
    ///
    /// # Errors
    /// - `INTERNAL` when the store rejects or fails the insert.
    pub fn create_blog(
        &self,
        author_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> ServiceResult<Blog> {
        let started_at = Instant::now();
        let fields = BlogFields::new(author_id, title, content);
        debug!("event=blog_create module=service status=start");

        match self.repo.insert_blog(&fields) {
            Ok(id) => {
                let blog = Blog::new(id.to_hex(), fields);
                info!(
                    "event=blog_create module=service status=ok duration_ms={} blog_id={}",
                    started_at.elapsed().as_millis(),
                    blog.id
                );
                Ok(blog)
            }
            Err(err) => {
                error!(
                    "event=blog_create module=service status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(status_from_repo_error(err))
            }
        }
    }

    /// Loads one blog by the hex form of its id.
    ///
    /// # Errors
    /// - `INVALID_ARGUMENT` when `blog_id` is not a valid identifier.
    /// - `NOT_FOUND` when no blog has this id.
    /// - `INTERNAL` when the store fails.
    pub fn read_blog(&self, blog_id: &str) -> ServiceResult<Blog> {
        let started_at = Instant::now();
        debug!("event=blog_read module=service status=start blog_id={blog_id}");

        match self.repo.find_blog(blog_id) {
            Ok((id, fields)) => {
                debug!(
                    "event=blog_read module=service status=ok duration_ms={} blog_id={}",
                    started_at.elapsed().as_millis(),
                    id
                );
                Ok(Blog::new(id.to_hex(), fields))
            }
            Err(err) => {
                let status = status_from_repo_error(err);
                match status.code {
                    Code::Internal => error!(
                        "event=blog_read module=service status=error duration_ms={} code={} error={}",
                        started_at.elapsed().as_millis(),
                        status.code,
                        status.message
                    ),
                    _ => warn!(
                        "event=blog_read module=service status=rejected duration_ms={} code={}",
                        started_at.elapsed().as_millis(),
                        status.code
                    ),
                }
                Err(status)
            }
        }
    }
}

/// Classifies an adapter failure into a caller-facing status.
pub fn status_from_repo_error(err: RepoError) -> Status {
    match err {
        RepoError::MalformedId(err) => Status::invalid_argument(format!("Cannot parse ID: {err}")),
        RepoError::NotFound(id) => {
            Status::not_found(format!("Cannot find blog with specified ID: {id}"))
        }
        RepoError::Storage(err) => Status::internal(format!("Internal error: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::status_from_repo_error;
    use crate::db::{DbError, ObjectId};
    use crate::repo::blog_repo::RepoError;
    use crate::service::status::Code;

    #[test]
    fn every_repo_error_maps_to_its_code() {
        let malformed = ObjectId::parse_str("nope").unwrap_err();
        assert_eq!(
            status_from_repo_error(RepoError::MalformedId(malformed)).code,
            Code::InvalidArgument
        );

        let missing = ObjectId::parse_str("ffffffffffffffffffffffff").unwrap();
        let status = status_from_repo_error(RepoError::NotFound(missing));
        assert_eq!(status.code, Code::NotFound);
        assert!(status.message.contains("ffffffffffffffffffffffff"));

        let status = status_from_repo_error(RepoError::Storage(DbError::Poisoned));
        assert_eq!(status.code, Code::Internal);
        assert!(status.message.starts_with("Internal error: "));
    }
}
