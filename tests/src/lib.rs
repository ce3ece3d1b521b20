//! # Slick Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs    # End-to-end user journeys
//!     ├── invariants.rs   # Counter and relationship invariants under random workloads
//!     ├── concurrency.rs  # Colliding and disjoint operations across threads
//!     └── ipc_flows.rs    # JSON request/response round trips
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p slick-tests
//!
//! # By category
//! cargo test -p slick-tests integration::concurrency
//!
//! # Benchmarks
//! cargo bench -p slick-tests
//! ```

pub mod integration;
