//! Typed client for the blog RPC service.

use blog_core::rpc::{
    CreateBlogRequest, CreateBlogResponse, ReadBlogRequest, ReadBlogResponse, CREATE_BLOG_PATH,
    READ_BLOG_PATH,
};
use blog_core::{Blog, Code, Status};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:50051";

/// Failure of one client call.
#[derive(Debug)]
pub enum ClientError {
    /// The request never produced a decodable response.
    Transport(reqwest::Error),
    /// The server answered with a classified error.
    Status(Status),
}

impl ClientError {
    /// RPC code of a server-side failure, `None` for transport failures.
    pub fn code(&self) -> Option<Code> {
        match self {
            Self::Transport(_) => None,
            Self::Status(status) => Some(status.code),
        }
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Status(status) => write!(f, "{status}"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status(status) => Some(status),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Client bound to one server base URL.
#[derive(Debug, Clone)]
pub struct BlogClient {
    http: reqwest::Client,
    base_url: String,
}

impl BlogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create_blog(
        &self,
        author_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Blog, ClientError> {
        let request = CreateBlogRequest {
            author_id: author_id.into(),
            title: title.into(),
            content: content.into(),
        };
        let response: CreateBlogResponse = self.call(CREATE_BLOG_PATH, &request).await?;
        Ok(response.blog)
    }

    pub async fn read_blog(&self, blog_id: impl Into<String>) -> Result<Blog, ClientError> {
        let request = ReadBlogRequest {
            blog_id: blog_id.into(),
        };
        let response: ReadBlogResponse = self.call(READ_BLOG_PATH, &request).await?;
        Ok(response.blog)
    }

    async fn call<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, ClientError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("event=rpc_call module=client url={url}");

        let response = self.http.post(&url).json(request).send().await?;
        if response.status().is_success() {
            return Ok(response.json::<Resp>().await?);
        }

        let http_status = response.status();
        let status = match response.json::<Status>().await {
            Ok(status) => status,
            Err(_) => Status::internal(format!("unexpected HTTP status {http_status}")),
        };
        Err(ClientError::Status(status))
    }
}
