use std::env;

use chrono::Duration;
use derive_more::Display;

use generator::{DEFAULT_BASE_URL, DEFAULT_MODEL};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_DRAFT_TTL_MINUTES: i64 = 60;

#[derive(Debug, Display, PartialEq)]
pub enum ConfigError {
    #[display(fmt = "{} must be set", _0)]
    Missing(&'static str),
    #[display(fmt = "{} is invalid: {}", _0, _1)]
    Invalid(&'static str, String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub draft_ttl_minutes: i64,
    pub client_host: Option<String>,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let draft_ttl_minutes = match lookup("DRAFT_TTL_MINUTES") {
            Some(value) => match value.parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => return Err(ConfigError::Invalid("DRAFT_TTL_MINUTES", value)),
            },
            None => DEFAULT_DRAFT_TTL_MINUTES,
        };

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            draft_ttl_minutes,
            client_host: lookup("CLIENT_HOST"),
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        })
    }

    pub fn draft_ttl(&self) -> Duration {
        Duration::minutes(self.draft_ttl_minutes)
    }
}
