use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    /// Budget applied to every database call made on behalf of a request.
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), "port number", 8080u16)?;
        let mongodb_uri =
            lookup("MONGODB_URI").unwrap_or_else(|| "mongodb://localhost:27017".to_string());
        let mongodb_database =
            lookup("MONGODB_DATABASE").unwrap_or_else(|| "scoreboard".to_string());
        let timeout_secs = parse_or(
            "REQUEST_TIMEOUT_SECS",
            lookup("REQUEST_TIMEOUT_SECS"),
            "number of seconds",
            10u64,
        )?;

        Ok(AppConfig {
            host,
            port,
            mongodb_uri,
            mongodb_database,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, expected, value }),
    }
}
