//! Identity service client
//!
//! Asks the external identity service whether a bearer token is valid.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::ports::{TokenCheck, TokenValidator};
use crate::error::{DomainError, IdentityError};

/// Body returned by the identity service's token check
#[derive(Debug, Deserialize)]
struct CheckTokenResponse {
    #[serde(default)]
    msg: Option<String>,
}

/// HTTP implementation of the token validator
pub struct IdentityServiceClient {
    http: Client,
    base_url: String,
}

impl IdentityServiceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check_token(&self, token: &str) -> Result<TokenCheck, IdentityError> {
        let response = self
            .http
            .get(self.api_url("/auth/check"))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            Ok(TokenCheck::Valid)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = response
                .json::<CheckTokenResponse>()
                .await
                .ok()
                .and_then(|body| body.msg)
                .unwrap_or_else(|| format!("Token rejected by identity service ({})", status));
            Ok(TokenCheck::Invalid(message))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(IdentityError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl TokenValidator for IdentityServiceClient {
    async fn validate(&self, token: &str) -> Result<TokenCheck, DomainError> {
        Ok(self.check_token(token).await?)
    }
}
