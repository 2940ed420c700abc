use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use super::ResolverError;

/// Structured error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// How a resolved message is written to the response body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseEncoding {
    /// `{"error": "<message>"}`
    #[default]
    Json,
    /// The bare message as `text/plain`
    PlainText,
}

impl ResponseEncoding {
    /// Render a status and message into a response
    pub fn render(self, status: StatusCode, message: &str) -> Response {
        match self {
            Self::Json => (status, Json(ErrorBody::new(message))).into_response(),
            Self::PlainText => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                message.to_string(),
            )
                .into_response(),
        }
    }
}

impl FromStr for ResponseEncoding {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "plain" | "plaintext" => Ok(Self::PlainText),
            other => Err(ResolverError::UnknownEncoding(other.to_string())),
        }
    }
}
