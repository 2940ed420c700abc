use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Resolver Metrics
    pub static ref ERROR_RESOLUTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "error_resolutions_total",
        "Total errors resolved into responses",
        &["outcome", "status"]  // outcome: no_error, invalid_status, resolved
    )
    .unwrap();

    pub static ref FALLBACK_MESSAGES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "fallback_messages_total",
        "Total responses whose message was replaced by the fallback message",
        &["outcome"]
    )
    .unwrap();
}

/// Initialize all metrics (called on startup)
pub fn init_metrics() {
    // Force lazy_static initialization
    lazy_static::initialize(&HTTP_REQUESTS_TOTAL);
    lazy_static::initialize(&HTTP_REQUEST_DURATION_SECONDS);
    lazy_static::initialize(&ERROR_RESOLUTIONS_TOTAL);
    lazy_static::initialize(&FALLBACK_MESSAGES_TOTAL);
}
