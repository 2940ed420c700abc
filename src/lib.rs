//! Resolves loosely-shaped errors left by upstream axum handlers into
//! deterministic, sanitized HTTP responses.

pub mod api;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod resolver;

pub use errors::{ErrorBody, ErrorDescriptor, PendingError, ResolverError, ResponseEncoding};
pub use resolver::{
    create_handler, resolve_errors, FallbackError, Outcome, RequestContext, Resolution, Resolver,
    ResolverLogger,
};
