//! # Slick Telemetry
//!
//! Observability for the Slick state core.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter` and a pretty or
//!   JSON console layer
//! - **Metrics**: Prometheus counters and histograms for the transition
//!   engine and the query layer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use slick_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config).expect("Failed to init telemetry");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SLICK_SERVICE_NAME` | `slick` | Service name in logs |
//! | `SLICK_LOG_LEVEL` | `info` | Log level filter |
//! | `SLICK_JSON_LOGS` | `false` | JSON formatted logs |
//! | `SLICK_ENVIRONMENT` | `local` | Deployment environment |

mod config;
pub mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    gather_metrics, register_metrics, COMMIT_CONFLICTS, OPERATIONS_TOTAL, OPERATION_DURATION,
    SCANNED_RECORDS, SCANS_TOTAL,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize metrics and the tracing subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    // Metrics first (no global subscriber needed)
    register_metrics()?;

    tracing_setup::init_tracing(config)?;

    let rendered =
        serde_json::to_string(config).map_err(|e| TelemetryError::Config(e.to_string()))?;
    tracing::debug!(config = %rendered, "Telemetry configured");

    Ok(())
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
