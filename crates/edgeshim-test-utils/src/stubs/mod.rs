//! `wiremock` stubs of the partner APIs.
//!
//! Each helper mounts the mocks one read endpoint needs on a [`MockServer`].
//! Write endpoints are left to the tests so they can assert on the request.
//!
//! [`MockServer`]: wiremock::MockServer

pub mod i2edge;
pub mod kubernetes;
