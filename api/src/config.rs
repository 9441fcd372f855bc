use std::env;

use anyhow::Context;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Base URL of the identity service that checks bearer tokens
    pub identity_url: String,
    /// Shared secret for locally verified tokens; overrides `identity_url`
    pub token_secret: Option<String>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8080)?,
            identity_url: env::var("IDENTITY_URL")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),
            token_secret: env::var("TOKEN_SECRET").ok().filter(|s| !s.is_empty()),
            rate_limit_per_second: parse_var("RATE_LIMIT_PER_SECOND", 10)?,
            rate_limit_burst: parse_var("RATE_LIMIT_BURST", 20)?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}
