//! Error descriptors attached by upstream handlers, and the crate's own errors

pub mod codes;
pub mod response;

pub use codes::{is_legal_status, is_unwanted_message, legal_status};
pub use response::{ErrorBody, ResponseEncoding};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Loosely shaped error left behind by an upstream handler.
///
/// Every field is optional. `status` is kept as a raw JSON number so that
/// nonsensical values survive until the resolver validates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Number>,
    /// String form of the source error, if the descriptor was built from one
    #[serde(skip)]
    pub display: Option<String>,
}

impl ErrorDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor with a message and a status
    pub fn with(message: impl Into<String>, status: u16) -> Self {
        Self::new().message(message).status(status)
    }

    /// Build a descriptor from any displayable error.
    ///
    /// The rendered error becomes both the message and the string form.
    pub fn from_error<E: fmt::Display + ?Sized>(error: &E) -> Self {
        let rendered = error.to_string();
        Self {
            message: Some(rendered.clone()),
            display: Some(rendered),
            ..Self::default()
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    pub fn status(mut self, status: impl Into<Number>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Status as an arbitrary float, for callers relaying untrusted numbers
    pub fn raw_status(mut self, status: f64) -> Self {
        self.status = Number::from_f64(status);
        self
    }

    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

impl IntoResponse for ErrorDescriptor {
    fn into_response(self) -> Response {
        PendingError::from(self).into_response()
    }
}

/// What an upstream handler leaves for the resolver.
///
/// `error: None` means the handler gave up without saying why.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingError {
    pub error: Option<ErrorDescriptor>,
    pub message: Option<String>,
}

impl PendingError {
    /// Hand the request on without setting an error
    pub fn none() -> Self {
        Self::default()
    }

    /// Attach a textual description to the request itself
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl From<ErrorDescriptor> for PendingError {
    fn from(error: ErrorDescriptor) -> Self {
        Self {
            error: Some(error),
            message: None,
        }
    }
}

impl IntoResponse for PendingError {
    /// Placeholder response; `resolve_errors` swaps it for the resolved one.
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Misconfiguration detected while building a resolver
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolverError {
    #[error("fallback status {0} is not a registered HTTP status code")]
    InvalidFallbackStatus(u16),

    #[error("unknown response encoding '{0}', expected 'json' or 'text'")]
    UnknownEncoding(String),
}
