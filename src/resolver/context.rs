use axum::http::{request, Extensions, Method, Request};
use std::fmt;

use crate::errors::{ErrorDescriptor, PendingError};

/// What the resolver gets to see of a request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub method: Method,
    pub url: String,
    /// Description attached to the request itself rather than to an error
    pub message: Option<String>,
    pub error: Option<ErrorDescriptor>,
}

impl RequestContext {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            message: None,
            error: None,
        }
    }

    pub fn with_error(mut self, error: ErrorDescriptor) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Merge in whatever an upstream handler left behind
    pub fn with_pending(mut self, pending: PendingError) -> Self {
        self.error = pending.error;
        self.message = pending.message;
        self
    }

    pub fn from_parts(parts: &request::Parts) -> Self {
        Self::from_extensions(&parts.method, &parts.uri.to_string(), &parts.extensions)
    }

    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::from_extensions(
            request.method(),
            &request.uri().to_string(),
            request.extensions(),
        )
    }

    fn from_extensions(method: &Method, url: &str, extensions: &Extensions) -> Self {
        let context = Self::new(method.clone(), url);
        match extensions.get::<PendingError>() {
            Some(pending) => context.with_pending(pending.clone()),
            None => context,
        }
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestContext({} {})", self.method, self.url)
    }
}
