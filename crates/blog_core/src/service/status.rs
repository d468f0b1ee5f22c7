//! Caller-facing status codes for failed RPC calls.
//!
//! Serialized as `{"code": "NOT_FOUND", "message": "..."}`, which is the error
//! body of every failed call on the wire.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed classification of RPC failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    /// The caller sent something that cannot be interpreted.
    InvalidArgument,
    /// The request was understood but the record does not exist.
    NotFound,
    /// The store or the server itself failed.
    Internal,
}

impl Code {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL",
        }
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified RPC error carrying a human-readable cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: Code,
    pub message: String,
}

impl Status {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Code::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Code::Internal, message)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl Error for Status {}

#[cfg(test)]
mod tests {
    use super::{Code, Status};

    #[test]
    fn status_serializes_with_screaming_case_code() {
        let json = serde_json::to_value(Status::not_found("gone")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "gone");

        let decoded: Status =
            serde_json::from_str(r#"{"code":"INVALID_ARGUMENT","message":"bad"}"#).unwrap();
        assert_eq!(decoded.code, Code::InvalidArgument);
    }

    #[test]
    fn code_display_matches_wire_name() {
        assert_eq!(Code::Internal.to_string(), "INTERNAL");
        assert_eq!(
            Status::invalid_argument("x").to_string(),
            "INVALID_ARGUMENT: x"
        );
    }
}
