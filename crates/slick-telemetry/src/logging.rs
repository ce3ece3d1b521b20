//! Structured logging helpers.
//!
//! Every line carries a `subsystem` field so JSON logs from the engine, the
//! query layer and the request handler can be told apart without parsing
//! the message.

/// Emit a tracing event with a `subsystem` field.
#[macro_export]
macro_rules! log_event {
    (info, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (error, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

/// Subsystem labels used with [`log_event!`].
pub mod subsystems {
    pub const ENGINE: &str = "engine";
    pub const QUERY: &str = "query";
    pub const IPC: &str = "ipc";
    pub const STORE: &str = "store";
}
