//! # slick-state
//!
//! Account addressing, state transitions and queries for the Slick social
//! network: profiles, communities, memberships, posts, comments, likes,
//! follows, polls and votes.
//!
//! ## Role in System
//!
//! - **Single Source of Truth**: every record lives at an address derived
//!   from its kind and semantic key, never at an allocated location
//! - **Atomic Transitions**: each operation commits all of its writes or
//!   none of them
//! - **Read Surface**: point lookups by address plus scan-of-kind queries
//!   for the web client
//!
//! ## Concurrency
//!
//! There is no lock manager. Two creates for the same key derive the same
//! address and only one can commit; the other re-executes against fresh
//! state and fails `AlreadyExists`. Operations over disjoint addresses never
//! conflict.
//!
//! ```text
//! caller ──SocialRequest──→ [ipc::SocialRequestHandler]
//!                                     │
//!                                     ↓
//!                           [service::SocialService] ──events──→ EventPublisher
//!                            │        │         │
//!                   derive addresses  │      TipLedger (precommit)
//!                                     ↓
//!                              AccountStore (versioned, atomic batch)
//! ```

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ipc;
pub mod ports;
pub mod service;

/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::*;
pub use domain::*;
pub use events::*;
pub use ipc::*;
pub use ports::*;
pub use service::{InMemorySocialService, SocialDependencies, SocialService};
