//! RPC contract shared by the blog server and its clients.
//!
//! Every method is a `POST` of a JSON request body to
//! `/<package>.<Service>/<Method>`. Successful calls answer with the response
//! type; failed calls answer with a serialized [`Status`](crate::Status) and an
//! HTTP status derived from its code.
//!
//! Absent request fields decode as empty strings, so a create with missing
//! fields stores them empty and a read with no id is rejected as malformed.

use crate::model::blog::Blog;
use serde::{Deserialize, Serialize};

/// Fully qualified service name.
pub const SERVICE_NAME: &str = "blog.BlogService";
pub const CREATE_BLOG_PATH: &str = "/blog.BlogService/CreateBlog";
pub const READ_BLOG_PATH: &str = "/blog.BlogService/ReadBlog";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateBlogRequest {
    pub author_id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBlogResponse {
    pub blog: Blog,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadBlogRequest {
    pub blog_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadBlogResponse {
    pub blog: Blog,
}
