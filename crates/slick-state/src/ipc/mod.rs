//! # IPC
//!
//! Typed request/response surface for callers outside the process: the
//! web client, wallet bridges and tooling. Requests arrive with the caller
//! already authenticated by the external identity system.

mod handler;
mod payloads;

pub use handler::{IpcError, SocialRequestHandler};
pub use payloads::*;
