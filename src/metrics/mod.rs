// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics, ANSWER_SHAPES, PROVIDER_CALLS, PROVIDER_DURATION, REQUESTS_TOTAL,
    REQUEST_DURATION,
};

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    let status = status_code.to_string();
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint, &status])
        .observe(duration_secs);
}

/// Helper to record a chat provider call. Calls that never left the process
/// (chat disabled) are counted but not timed.
pub fn record_provider_call(outcome: &str, duration_secs: Option<f64>) {
    PROVIDER_CALLS.with_label_values(&[outcome]).inc();

    if let Some(secs) = duration_secs {
        PROVIDER_DURATION.observe(secs);
    }
}

pub fn record_answer_shape(shape: &str) {
    ANSWER_SHAPES.with_label_values(&[shape]).inc();
}
