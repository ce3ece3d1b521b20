//! Prometheus metrics for the Slick state core.
//!
//! All metrics follow the naming convention: `slick_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // TRANSITION ENGINE
    // =========================================================================

    /// Operations by name and outcome (outcome: ok or the error code)
    pub static ref OPERATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("slick_engine_operations_total", "State transitions by operation and outcome"),
        &["operation", "outcome"]
    ).expect("metric creation failed");

    /// Optimistic commits that found a stale read set and re-executed
    pub static ref COMMIT_CONFLICTS: Counter = Counter::new(
        "slick_engine_commit_conflicts_total",
        "Commits rejected because a read address changed underneath the operation"
    ).expect("metric creation failed");

    /// End-to-end operation latency including re-executions
    pub static ref OPERATION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "slick_engine_operation_duration_seconds",
            "Time spent executing a state transition"
        ).buckets(exponential_buckets(0.00001, 2.0, 16).expect("valid buckets")),
        &["operation"]
    ).expect("metric creation failed");

    // =========================================================================
    // QUERY LAYER
    // =========================================================================

    /// Full scans of one account kind
    pub static ref SCANS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("slick_query_scans_total", "Scan-of-kind queries by account kind"),
        &["kind"]
    ).expect("metric creation failed");

    /// Records decoded by scans
    pub static ref SCANNED_RECORDS: CounterVec = CounterVec::new(
        Opts::new("slick_query_scanned_records_total", "Records decoded by scans"),
        &["kind"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already-registered collectors are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(OPERATIONS_TOTAL.clone()),
        Box::new(COMMIT_CONFLICTS.clone()),
        Box::new(OPERATION_DURATION.clone()),
        Box::new(SCANS_TOTAL.clone()),
        Box::new(SCANNED_RECORDS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
