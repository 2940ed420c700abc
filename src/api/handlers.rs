use axum::{response::IntoResponse, Json};
use lazy_static::lazy_static;
use serde_json::{json, Value};
use std::time::Instant;

use crate::errors::{ErrorDescriptor, PendingError};

lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

/// Failures the example lookups can run into
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Not found!")]
    NotFound,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "error-resolver",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": START_TIME.elapsed().as_secs(),
    }))
}

/// Handler that never fails
#[utoipa::path(
    get,
    path = "/example/200",
    tag = "examples",
    responses(
        (status = 200, description = "Always succeeds", body = serde_json::Value)
    )
)]
pub async fn example_ok() -> Json<Value> {
    Json(json!({"message": "Damn I'm so good I never fail"}))
}

/// Lookup that fails with a typed error carrying a 404
#[utoipa::path(
    get,
    path = "/example/404/error",
    tag = "examples",
    responses(
        (status = 404, description = "The thing was not found", body = crate::errors::ErrorBody)
    )
)]
pub async fn example_not_found_error() -> Result<Json<Value>, ErrorDescriptor> {
    Err(ErrorDescriptor::from_error(&LookupError::NotFound).status(404))
}

/// Lookup that fails with a plain descriptor
#[utoipa::path(
    get,
    path = "/example/404/object",
    tag = "examples",
    responses(
        (status = 404, description = "The thing was not found", body = crate::errors::ErrorBody)
    )
)]
pub async fn example_not_found_object() -> Result<Json<Value>, ErrorDescriptor> {
    Err(ErrorDescriptor::with("Not found!", 404))
}

/// Handler that gives up without saying why
#[utoipa::path(
    get,
    path = "/example/500",
    tag = "examples",
    responses(
        (status = 500, description = "Unexpected failure", body = crate::errors::ErrorBody)
    )
)]
pub async fn example_unexpected() -> PendingError {
    PendingError::none()
}
