//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The mocks keep their state behind `Arc`s, so a clone handed to the service
//! still lets the test inspect or reconfigure the shared state.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
