//! Identity adapters
//!
//! Implementations of the token validator port.

pub mod remote;
pub mod signed;

pub use remote::IdentityServiceClient;
pub use signed::SignedTokenValidator;
