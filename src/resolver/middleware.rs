use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::{RequestContext, Resolver};
use crate::errors::PendingError;

/// Middleware that resolves responses carrying a [`PendingError`].
///
/// Responses without one pass through untouched.
pub async fn resolve_errors(
    State(resolver): State<Resolver>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let context = RequestContext::from_parts(&parts);
    let request = Request::from_parts(parts, body);

    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<PendingError>() {
        Some(pending) => resolver.respond(&context.with_pending(pending)),
        None => response,
    }
}
