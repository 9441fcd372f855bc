//! Locally verified signed tokens
//!
//! Tokens have the form `<subject>.<expires_at>.<hex hmac-sha256>`, where
//! `expires_at` is a unix timestamp in seconds and the MAC covers
//! `<subject>.<expires_at>`. They are signed with a secret shared with whoever
//! issues them. Used when no identity service is reachable, e.g. in
//! development.

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::ports::{TokenCheck, TokenValidator};
use crate::error::DomainError;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 implementation of the token validator
pub struct SignedTokenValidator {
    secret: String,
}

impl SignedTokenValidator {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    fn mac(&self) -> Result<HmacSha256, DomainError> {
        HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| DomainError::Internal("Invalid token secret".to_string()))
    }

    /// Check a token against the clock value `now` (unix seconds)
    fn check_at(&self, token: &str, now: i64) -> Result<TokenCheck, DomainError> {
        let Some((claims, signature)) = token.rsplit_once('.') else {
            return Ok(TokenCheck::Invalid("Malformed token".to_string()));
        };
        let Some((subject, expires_at)) = claims.rsplit_once('.') else {
            return Ok(TokenCheck::Invalid("Malformed token".to_string()));
        };
        if subject.is_empty() {
            return Ok(TokenCheck::Invalid("Token has no subject".to_string()));
        }

        let Ok(signature) = hex::decode(signature) else {
            return Ok(TokenCheck::Invalid("Malformed token signature".to_string()));
        };

        let mut mac = self.mac()?;
        mac.update(claims.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            return Ok(TokenCheck::Invalid("Token signature mismatch".to_string()));
        }

        // Only trusted once the signature holds
        let Ok(expires_at) = expires_at.parse::<i64>() else {
            return Ok(TokenCheck::Invalid("Malformed token expiry".to_string()));
        };
        if expires_at <= now {
            return Ok(TokenCheck::Invalid("Token expired".to_string()));
        }

        Ok(TokenCheck::Valid)
    }
}

#[async_trait]
impl TokenValidator for SignedTokenValidator {
    async fn validate(&self, token: &str) -> Result<TokenCheck, DomainError> {
        self.check_at(token, Utc::now().timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn sign(secret: &str, subject: &str, expires_at: i64) -> String {
        let claims = format!("{}.{}", subject, expires_at);
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(claims.as_bytes());
        format!("{}.{}", claims, hex::encode(mac.finalize().into_bytes()))
    }

    fn in_one_hour() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[tokio::test]
    async fn valid_signature_is_accepted() {
        let validator = SignedTokenValidator::new(SECRET.to_string());
        let token = sign(SECRET, "customer-42", in_one_hour());

        assert_eq!(validator.validate(&token).await.unwrap(), TokenCheck::Valid);
    }

    #[tokio::test]
    async fn subject_may_contain_dots() {
        let validator = SignedTokenValidator::new(SECRET.to_string());
        let token = sign(SECRET, "ada@example.com", in_one_hour());

        assert_eq!(validator.validate(&token).await.unwrap(), TokenCheck::Valid);
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let validator = SignedTokenValidator::new(SECRET.to_string());
        let token = sign("other-secret", "customer-42", in_one_hour());

        assert_eq!(
            validator.validate(&token).await.unwrap(),
            TokenCheck::Invalid("Token signature mismatch".to_string())
        );
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let validator = SignedTokenValidator::new(SECRET.to_string());
        let token = sign(SECRET, "customer-42", Utc::now().timestamp() - 1);

        assert_eq!(
            validator.validate(&token).await.unwrap(),
            TokenCheck::Invalid("Token expired".to_string())
        );
    }

    #[test]
    fn token_expires_at_its_timestamp() {
        let validator = SignedTokenValidator::new(SECRET.to_string());
        let token = sign(SECRET, "customer-42", 1_000);

        assert_eq!(validator.check_at(&token, 999).unwrap(), TokenCheck::Valid);
        assert_eq!(
            validator.check_at(&token, 1_000).unwrap(),
            TokenCheck::Invalid("Token expired".to_string())
        );
    }

    #[tokio::test]
    async fn extended_expiry_breaks_the_signature() {
        let validator = SignedTokenValidator::new(SECRET.to_string());
        let token = sign(SECRET, "customer-42", 1_000);
        let (_, signature) = token.rsplit_once('.').unwrap();
        let forged = format!("customer-42.{}.{}", in_one_hour(), signature);

        assert_eq!(
            validator.validate(&forged).await.unwrap(),
            TokenCheck::Invalid("Token signature mismatch".to_string())
        );
    }

    #[tokio::test]
    async fn malformed_tokens_are_rejected() {
        let validator = SignedTokenValidator::new(SECRET.to_string());

        for token in [
            "no-separator",
            "subject.abcd",
            ".1000.abcd",
            "subject.1000.not-hex",
        ] {
            let result = validator.validate(token).await.unwrap();
            assert!(
                matches!(result, TokenCheck::Invalid(_)),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[tokio::test]
    async fn non_numeric_expiry_is_rejected() {
        let validator = SignedTokenValidator::new(SECRET.to_string());
        let claims = "customer-42.soon";
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(claims.as_bytes());
        let token = format!("{}.{}", claims, hex::encode(mac.finalize().into_bytes()));

        assert_eq!(
            validator.validate(&token).await.unwrap(),
            TokenCheck::Invalid("Malformed token expiry".to_string())
        );
    }
}
