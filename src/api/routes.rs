use axum::{middleware, routing::get, Json, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::handlers::{
    example_not_found_error, example_not_found_object, example_ok, example_unexpected, health,
};
use super::openapi::ApiDoc;
use crate::metrics;
use crate::resolver::{resolve_errors, FallbackError, Resolver};

/// Example routes behind the resolver, with a 404 catch-all for everything else
pub fn create_router(resolver: Resolver) -> Router {
    let not_found = resolver.clone().with_fallback(FallbackError::not_found());

    Router::new()
        // Health check
        .route("/health", get(health))
        // Example handlers, one per resolution path
        .route("/example/200", get(example_ok))
        .route("/example/404/error", get(example_not_found_error))
        .route("/example/404/object", get(example_not_found_object))
        .route("/example/500", get(example_unexpected))
        // Metrics endpoint (Prometheus)
        .route("/metrics", get(metrics::metrics_handler))
        // OpenAPI documentation
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // Anything unrouted answers 404 instead of a generic 500
        .fallback_service(not_found)
        // Add middleware (order matters: resolve -> metrics -> trace)
        .layer(middleware::from_fn_with_state(resolver, resolve_errors))
        .layer(middleware::from_fn(metrics::middleware::track_metrics))
        .layer(TraceLayer::new_for_http())
}
