//! Identity port trait
//!
//! Bearer tokens are issued and verified outside this service; the domain
//! only needs a yes/no answer plus the verifier's diagnostic.

use async_trait::async_trait;

use crate::error::DomainError;

/// Outcome of a token check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCheck {
    Valid,
    /// Rejected, with the validator's own explanation
    Invalid(String),
}

/// Validates bearer tokens
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Check a raw token (without the `Bearer ` prefix)
    ///
    /// `Err` means the validator itself failed, not that the token is bad.
    async fn validate(&self, token: &str) -> Result<TokenCheck, DomainError>;
}
