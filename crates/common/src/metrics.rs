use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static DIRECTORY_ADDRESS_LOOKUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "directory_address_lookups_total",
        "Address lookups answered by the customer directory",
        &["outcome"]
    )
    .expect("register directory_address_lookups_total")
});

pub static CATALOG_DIRECTORY_CALLS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "catalog_directory_calls_total",
        "Outbound calls from the rental catalog to the customer directory",
        &["outcome"]
    )
    .expect("register catalog_directory_calls_total")
});

pub static CATALOG_DIRECTORY_CALL_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "catalog_directory_call_duration_seconds",
        "Outbound directory call duration in seconds",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register catalog_directory_call_duration")
});

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
