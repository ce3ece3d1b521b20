//! # Adapters
//!
//! In-process implementations of the outbound ports. They back the default
//! service and every test; a host embedding the engine supplies its own.

mod events;
mod ledger;
mod memory_store;
mod serializer;
mod time;

pub use events::{InMemoryEventLog, NoopPublisher};
pub use ledger::InMemoryLedger;
pub use memory_store::InMemoryAccountStore;
pub use serializer::BincodeAccountSerializer;
pub use time::{ManualClock, SystemTimeSource};
