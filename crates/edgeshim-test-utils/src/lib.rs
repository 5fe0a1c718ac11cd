//! Testing utilities for edgeshim.
//!
//! Payload fixtures, a `mockall` mock of the partner transport, `wiremock`
//! stubs of the partner APIs and test tracing setup.

pub mod fixtures;
pub mod mocks;
pub mod stubs;
pub mod tracing;

/// Re-export commonly used crates for convenience
pub use mockall;
pub use wiremock;

pub use self::tracing::init_test_tracing;
