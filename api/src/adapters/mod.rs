//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod identity;
pub mod postgres;

pub use identity::{IdentityServiceClient, SignedTokenValidator};
pub use postgres::{PostgresAccountLookup, PostgresShipmentRepository};
