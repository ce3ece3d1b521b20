//! Cross-module tests driving the service through its public ports.

pub mod concurrency;
pub mod invariants;
pub mod ipc_flows;
pub mod scenarios;
