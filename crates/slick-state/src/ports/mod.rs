//! # Ports
//!
//! - `inbound` - the operation and query surface (driving side)
//! - `outbound` - store, clock, ledger, event and codec traits (driven side)

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
