//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive such as `slick_state=debug,info`
    pub log_level: String,

    /// Whether to install a console layer at all
    pub console_output: bool,

    /// Whether console logs are emitted as JSON
    pub json_logs: bool,

    /// Deployment environment (local, devnet, mainnet)
    pub environment: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "slick".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            environment: "local".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SLICK_SERVICE_NAME`: Service name (default: slick)
    /// - `SLICK_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `SLICK_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `SLICK_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `SLICK_ENVIRONMENT`: Environment name (default: local)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("SLICK_SERVICE_NAME").unwrap_or_else(|_| "slick".to_string()),

            log_level: env::var("SLICK_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("SLICK_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("SLICK_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            environment: env::var("SLICK_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
        }
    }

    /// Override the log filter.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switch JSON output on or off.
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Service name qualified by environment, e.g. `slick-devnet`.
    pub fn full_service_name(&self) -> String {
        if self.environment == "local" {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.environment)
        }
    }
}
