use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::Service;

use error_resolver::{
    api, create_handler, resolve_errors, ErrorDescriptor, FallbackError, PendingError,
    Resolver, ResolverLogger, ResponseEncoding,
};

#[derive(Default)]
struct RecordingLogger(Mutex<Vec<String>>);

impl ResolverLogger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
    fn info(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
    fn warn(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
    fn error(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

// Helper to create the demo app
fn create_test_app() -> Router {
    api::routes::create_router(Resolver::new())
}

// Helper to send request and return status with raw body
async fn send_request(app: &mut Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(body.to_vec()).unwrap())
}

// Helper to send request and parse JSON response
async fn send_json_request(app: &mut Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send_request(app, uri).await;
    let json: Value = serde_json::from_str(&body).unwrap_or(json!({}));
    (status, json)
}

// Single route that attaches `pending` and hands over to `resolver`
fn single_route_app(resolver: Resolver, pending: PendingError) -> Router {
    Router::new()
        .route(
            "/resolve",
            get(move || {
                let pending = pending.clone();
                async move { pending }
            }),
        )
        .layer(middleware::from_fn_with_state(resolver, resolve_errors))
}

#[tokio::test]
async fn test_health_endpoint() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "error-resolver");
}

#[tokio::test]
async fn test_example_ok_is_untouched() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "/example/200").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Damn I'm so good I never fail"}));
}

#[tokio::test]
async fn test_example_typed_error_resolves_to_404() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "/example/404/error").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found!"}));
}

#[tokio::test]
async fn test_example_descriptor_resolves_to_404() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "/example/404/object").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found!"}));
}

#[tokio::test]
async fn test_example_without_error_is_generic_500() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "/example/500").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal Server Error"}));
}

#[tokio::test]
async fn test_unrouted_path_hits_not_found_fallback() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "/definitely/not/a/route").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not Found!"}));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Error Resolver");
}

#[tokio::test]
async fn test_metrics_endpoint_reports_resolutions() {
    let mut app = create_test_app();
    send_request(&mut app, "/example/404/object").await;
    let (status, body) = send_request(&mut app, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("error_resolutions_total"));
}

// ========== RESOLUTION SCENARIOS ==========

#[tokio::test]
async fn test_no_descriptor_plain_text() {
    let resolver = Resolver::new().with_encoding(ResponseEncoding::PlainText);
    let mut app = single_route_app(resolver, PendingError::none());

    let (status, body) = send_request(&mut app, "/resolve").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
}

#[tokio::test]
async fn test_teapot_descriptor() {
    let mut app = single_route_app(
        Resolver::new(),
        ErrorDescriptor::with("I really like tea", 418).into(),
    );

    let (status, body) = send_json_request(&mut app, "/resolve").await;
    assert_eq!(status, StatusCode::IM_A_TEAPOT);
    assert_eq!(body, json!({"error": "I really like tea"}));
}

#[tokio::test]
async fn test_invalid_status_without_message() {
    let mut app = single_route_app(Resolver::new(), ErrorDescriptor::new().status(9).into());

    let (status, body) = send_json_request(&mut app, "/resolve").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal Server Error"}));
}

#[tokio::test]
async fn test_invalid_status_with_message() {
    let mut app = single_route_app(
        Resolver::new().with_encoding(ResponseEncoding::PlainText),
        ErrorDescriptor::new().status(9).message("DataStore Error").into(),
    );

    let (status, body) = send_request(&mut app, "/resolve").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "DataStore Error");
}

#[tokio::test]
async fn test_catch_all_with_not_found_fallback() {
    let mut app = Router::new()
        .route("/known", get(|| async { "known" }))
        .fallback_service(create_handler(None, Some(FallbackError::not_found())));

    let (status, body) = send_json_request(&mut app, "/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not Found!"}));
}

#[tokio::test]
async fn test_descriptor_deserialized_from_upstream_json() {
    let descriptor: ErrorDescriptor =
        serde_json::from_value(json!({"msg": "Quota exhausted", "status": 429})).unwrap();
    let mut app = single_route_app(Resolver::new(), descriptor.into());

    let (status, body) = send_json_request(&mut app, "/resolve").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, json!({"error": "Quota exhausted"}));
}

#[tokio::test]
async fn test_unwanted_message_is_not_leaked() {
    let mut app = single_route_app(
        Resolver::new(),
        ErrorDescriptor::with("[object Object]", 502).into(),
    );

    let (status, body) = send_json_request(&mut app, "/resolve").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "Internal Server Error"}));
}

#[tokio::test]
async fn test_unwanted_message_is_not_leaked_as_plain_text() {
    let mut app = single_route_app(
        Resolver::new().with_encoding(ResponseEncoding::PlainText),
        ErrorDescriptor::new().status(9).message("{}").into(),
    );

    let (status, body) = send_request(&mut app, "/resolve").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
}

#[tokio::test]
async fn test_plain_text_content_type() {
    let mut app = single_route_app(
        Resolver::new().with_encoding(ResponseEncoding::PlainText),
        ErrorDescriptor::with("Gone", 410).into(),
    );

    let request = Request::builder().uri("/resolve").body(Body::empty()).unwrap();
    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::GONE);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
}

#[tokio::test]
async fn test_injected_logger_receives_tagged_trail() {
    let logger = Arc::new(RecordingLogger::default());
    let resolver = create_handler(Some(logger.clone() as Arc<dyn ResolverLogger>), None);
    let mut app = single_route_app(resolver, ErrorDescriptor::with("Locked out", 423).into());

    let (status, _) = send_request(&mut app, "/resolve?door=front").await;
    assert_eq!(status, StatusCode::LOCKED);

    let lines = logger.0.lock().unwrap().clone();
    assert_eq!(
        lines,
        vec![
            "@ErrorResolver: Got error on GET /resolve?door=front".to_string(),
            "@ErrorResolver: Responding with 423: Locked out".to_string(),
        ]
    );
}
