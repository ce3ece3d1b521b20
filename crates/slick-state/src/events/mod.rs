//! # Domain Events
//!
//! One event per committed transition (two for community creation: the
//! community and the creator's membership). Events are buffered inside the
//! transaction and handed to the `EventPublisher` port after commit, so a
//! rejected or re-executed transition never publishes anything.

pub mod payloads;

pub use payloads::*;
