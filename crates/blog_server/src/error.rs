//! Error types for the blog server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blog_core::{Code, DbError, Status};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Wrapper turning a classified `Status` into an HTTP response.
///
/// The body is the serialized status: `{"code": "...", "message": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub Status);

impl ApiError {
    pub fn http_status(&self) -> StatusCode {
        http_status_for(self.0.code)
    }
}

/// HTTP status used on the wire for each RPC code.
pub fn http_status_for(code: Code) -> StatusCode {
    match code {
        Code::InvalidArgument => StatusCode::BAD_REQUEST,
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.http_status(), Json(self.0)).into_response()
    }
}

impl From<Status> for ApiError {
    fn from(status: Status) -> Self {
        ApiError(status)
    }
}

/// Startup and shutdown failures of the server process.
#[derive(Debug)]
pub enum ServerError {
    Logging(String),
    Store(DbError),
    /// The store handle was still shared when the server tried to close it.
    StoreInUse,
    Io(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging: {message}"),
            Self::Store(err) => write!(f, "store: {err}"),
            Self::StoreInUse => write!(f, "store: handle still in use at shutdown"),
            Self::Io(err) => write!(f, "io: {err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(_) | Self::StoreInUse => None,
            Self::Store(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for ServerError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
