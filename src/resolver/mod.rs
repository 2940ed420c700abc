//! Turns whatever error an upstream handler left behind into a safe response.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/tea", get(brew))
//!     .layer(middleware::from_fn_with_state(Resolver::new(), resolve_errors))
//!     .fallback_service(Resolver::new().with_fallback(FallbackError::not_found()));
//! ```

mod context;
mod logger;
mod middleware;

pub use context::RequestContext;
pub use logger::{PrefixedLogger, ResolverLogger, TracingLogger};
pub use middleware::resolve_errors;

use axum::{
    http::{Request, StatusCode},
    response::Response,
};
use std::convert::Infallible;
use std::fmt;
use std::future::{ready, Ready};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;

use crate::config::ResolverConfig;
use crate::errors::{is_legal_status, is_unwanted_message, legal_status, ResolverError, ResponseEncoding};
use crate::metrics::{ERROR_RESOLUTIONS_TOTAL, FALLBACK_MESSAGES_TOTAL};

pub const DEFAULT_LOG_TAG: &str = "@ErrorResolver";

/// Message and status used when nothing usable was attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackError {
    message: String,
    status: StatusCode,
}

impl FallbackError {
    /// Fails if `status` is not a registered HTTP status code
    pub fn new(message: impl Into<String>, status: u16) -> Result<Self, ResolverError> {
        if !is_legal_status(status) {
            return Err(ResolverError::InvalidFallbackStatus(status));
        }
        let status =
            StatusCode::from_u16(status).map_err(|_| ResolverError::InvalidFallbackStatus(status))?;

        Ok(Self {
            message: message.into(),
            status,
        })
    }

    /// Catch-all for unrouted paths
    pub fn not_found() -> Self {
        Self {
            message: "Not Found!".to_string(),
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Default for FallbackError {
    fn default() -> Self {
        Self {
            message: "Internal Server Error".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Which branch of the decision produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No error descriptor was attached
    NoError,
    /// A descriptor was attached but its status was unusable
    InvalidStatus,
    /// A descriptor with a registered status
    Resolved,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoError => "no_error",
            Self::InvalidStatus => "invalid_status",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and message the resolver settled on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub status: StatusCode,
    pub message: String,
    pub outcome: Outcome,
}

struct ResolverInner {
    logger: PrefixedLogger,
    fallback: FallbackError,
    encoding: ResponseEncoding,
}

/// Terminal handler that resolves a request's pending error into a response.
///
/// Cheap to clone. Usable as a `tower::Service` (route or fallback service)
/// and as the state of the [`resolve_errors`] middleware.
#[derive(Clone)]
pub struct Resolver {
    inner: Arc<ResolverInner>,
}

/// Build a resolver, defaulting whichever collaborator is absent
pub fn create_handler(
    logger: Option<Arc<dyn ResolverLogger>>,
    fallback: Option<FallbackError>,
) -> Resolver {
    let resolver = Resolver::new().with_fallback(fallback.unwrap_or_default());
    match logger {
        Some(logger) => resolver.with_logger(logger),
        None => resolver,
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("logger", &self.inner.logger)
            .field("fallback", &self.inner.fallback)
            .field("encoding", &self.inner.encoding)
            .finish()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ResolverInner {
                logger: PrefixedLogger::new(DEFAULT_LOG_TAG, Arc::new(TracingLogger)),
                fallback: FallbackError::default(),
                encoding: ResponseEncoding::default(),
            }),
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self, ResolverError> {
        let fallback = FallbackError::new(&config.fallback_message, config.fallback_status)?;
        let encoding = config.encoding.parse::<ResponseEncoding>()?;

        Ok(Self::new()
            .with_log_tag(&config.log_tag)
            .with_fallback(fallback)
            .with_encoding(encoding))
    }

    #[must_use]
    pub fn with_logger(self, logger: Arc<dyn ResolverLogger>) -> Self {
        let prefixed = self.inner.logger.with_inner(logger);
        self.rebuild(|inner| inner.logger = prefixed)
    }

    #[must_use]
    pub fn with_log_tag(self, tag: &str) -> Self {
        let prefixed = self.inner.logger.with_tag(tag);
        self.rebuild(|inner| inner.logger = prefixed)
    }

    #[must_use]
    pub fn with_fallback(self, fallback: FallbackError) -> Self {
        self.rebuild(|inner| inner.fallback = fallback)
    }

    #[must_use]
    pub fn with_encoding(self, encoding: ResponseEncoding) -> Self {
        self.rebuild(|inner| inner.encoding = encoding)
    }

    pub fn fallback(&self) -> &FallbackError {
        &self.inner.fallback
    }

    pub fn encoding(&self) -> ResponseEncoding {
        self.inner.encoding
    }

    fn rebuild(self, apply: impl FnOnce(&mut ResolverInner)) -> Self {
        let mut inner = ResolverInner {
            logger: self.inner.logger.clone(),
            fallback: self.inner.fallback.clone(),
            encoding: self.inner.encoding,
        };
        apply(&mut inner);
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Decide the status and message for a request
    pub fn resolve(&self, context: &RequestContext) -> Resolution {
        let logger = &self.inner.logger;
        logger.debug(&format!("Got error on {} {}", context.method, context.url));

        let candidate = candidate_message(context);

        let Some(error) = &context.error else {
            let status = self.inner.fallback.status;
            logger.warn(&format!(
                "No error set on request object, responding with {}",
                status.as_u16()
            ));
            logger.debug(&format!(
                "Req message: {}",
                context
                    .message
                    .clone()
                    .unwrap_or_else(|| context.to_string())
            ));
            return self.settle(status, candidate, Outcome::NoError);
        };

        let status = error
            .status
            .as_ref()
            .and_then(legal_status)
            .and_then(|code| StatusCode::from_u16(code).ok());

        match status {
            None => {
                let raw = error
                    .status
                    .as_ref()
                    .map_or_else(|| "undefined".to_string(), |n| n.to_string());
                logger.warn(&format!(
                    "Invalid error status code {}, responding with 500",
                    raw
                ));
                let resolution =
                    self.settle(StatusCode::INTERNAL_SERVER_ERROR, candidate, Outcome::InvalidStatus);
                logger.debug(&format!("Error message: {}", resolution.message));
                resolution
            }
            Some(status) => {
                let resolution = self.settle(status, candidate, Outcome::Resolved);
                logger.debug(&format!(
                    "Responding with {}: {}",
                    status.as_u16(),
                    resolution.message
                ));
                resolution
            }
        }
    }

    /// Resolve and encode
    pub fn respond(&self, context: &RequestContext) -> Response {
        let resolution = self.resolve(context);
        self.inner
            .encoding
            .render(resolution.status, &resolution.message)
    }

    fn settle(&self, status: StatusCode, candidate: Option<&str>, outcome: Outcome) -> Resolution {
        let message = match candidate {
            Some(message) if !is_unwanted_message(message) => message.to_string(),
            _ => {
                FALLBACK_MESSAGES_TOTAL
                    .with_label_values(&[outcome.as_str()])
                    .inc();
                self.inner.fallback.message.clone()
            }
        };

        ERROR_RESOLUTIONS_TOTAL
            .with_label_values(&[outcome.as_str(), status.as_str()])
            .inc();

        Resolution {
            status,
            message,
            outcome,
        }
    }
}

/// First non-blank of: descriptor message, descriptor msg, context message,
/// descriptor string form
fn candidate_message(context: &RequestContext) -> Option<&str> {
    let error = context.error.as_ref();
    [
        error.and_then(|e| e.message.as_deref()),
        error.and_then(|e| e.msg.as_deref()),
        context.message.as_deref(),
        error.and_then(|e| e.display.as_deref()),
    ]
    .into_iter()
    .flatten()
    .find(|m| !m.trim().is_empty())
}

impl<B> Service<Request<B>> for Resolver {
    type Response = Response;
    type Error = Infallible;
    type Future = Ready<Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let context = RequestContext::from_request(&request);
        ready(Ok(self.respond(&context)))
    }
}
