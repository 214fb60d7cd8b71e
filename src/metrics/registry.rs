// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_histogram_with_registry, CounterVec, Encoder, Histogram, HistogramOpts,
    HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Total number of API requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of API requests"),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).unwrap();

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // PROVIDER METRICS
    // ============================================================================

    /// Provider calls by outcome
    pub static ref PROVIDER_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("provider_calls_total", "Total chat provider calls"),
        &["outcome"], // success, upstream_error, timeout, network_error, unexpected, disabled
        REGISTRY
    ).unwrap();

    /// Provider call duration
    pub static ref PROVIDER_DURATION: Histogram = register_histogram_with_registry!(
        HistogramOpts::new("provider_call_duration_seconds", "Chat provider call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0]),
        REGISTRY
    ).unwrap();

    /// Which response shape produced the answer
    pub static ref ANSWER_SHAPES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("answer_shape_total", "Answers by provider response shape"),
        &["shape"],
        REGISTRY
    ).unwrap();
}

/// Render all registered metrics in the Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
