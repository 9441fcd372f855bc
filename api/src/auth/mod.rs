//! Bearer token extraction
//!
//! Tokens are only pulled off the request here; whether they are valid is
//! decided by the service through the `TokenValidator` port.

pub mod bearer;

pub use bearer::BearerToken;
