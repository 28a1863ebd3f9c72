use std::{env, time::Duration};

use thiserror::Error;

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_url: String,
    pub database_name: String,
    pub feed_url: String,
    pub refresh_interval: Duration,
    pub bind_addr: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("environment variable {0} has invalid value {1:?}")]
    Invalid(&'static str, String),
}

impl AppConfig {
    /// Loads the configuration from the environment.
    ///
    /// The connection string and feed URL are environment-only so that
    /// credentials never appear in the binary or the repository.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mongodb_url = require("MONGODB_URL")?;
        let database_name =
            env::var("MONGODB_DATABASE").unwrap_or_else(|_| "course_database".to_string());
        let feed_url = require("COURSE_FEED_URL")?;

        let refresh_secs = match env::var("FEED_REFRESH_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("FEED_REFRESH_SECS", raw))?,
            Err(_) => 60,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Ok(Self {
            mongodb_url,
            database_name,
            feed_url,
            refresh_interval: Duration::from_secs(refresh_secs),
            bind_addr,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}
