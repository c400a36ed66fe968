use crate::errors::{SusanError, SusanResult};
use std::{env, time::Duration};

pub const DEFAULT_BACKEND_URL: &str = "127.0.0.1";
pub const DEFAULT_BACKEND_PORT: &str = "11434";
pub const DEFAULT_MODEL: &str = "susan";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the local inference server. Built once at startup
/// and handed to the client explicitly; nothing here is global.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: format!("http://{}:{}", DEFAULT_BACKEND_URL, DEFAULT_BACKEND_PORT),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads `BACKEND_URL`, `BACKEND_PORT`, `SUSAN_MODEL` and
    /// `SUSAN_TIMEOUT_SECS` from the environment, falling back to the local
    /// Ollama defaults for anything unset.
    pub fn from_env() -> SusanResult<Self> {
        let host = env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let port = env::var("BACKEND_PORT").unwrap_or_else(|_| DEFAULT_BACKEND_PORT.to_string());
        let model = env::var("SUSAN_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let timeout_secs = match env::var("SUSAN_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                SusanError::config_error(format!("SUSAN_TIMEOUT_SECS must be an integer, got '{}'", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let config = Config {
            base_url: format!("http://{}:{}", host.trim_end_matches('/'), port),
            model,
            timeout: Duration::from_secs(timeout_secs),
        };
        validate_config(&config)?;
        Ok(config)
    }
}

fn validate_config(config: &Config) -> SusanResult<()> {
    if config.base_url.is_empty() {
        return Err(SusanError::config_error("Base URL is required"));
    }

    if config.model.is_empty() {
        return Err(SusanError::config_error("Model name is required"));
    }

    if config.timeout.is_zero() {
        return Err(SusanError::config_error("Timeout must be greater than 0"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_ollama() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://127.0.0.1:11434");
        assert_eq!(config.model, "susan");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_empty_model() {
        let mut config = Config::default();
        config.model = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_zero_timeout() {
        let mut config = Config::default();
        config.timeout = Duration::from_secs(0);
        assert!(validate_config(&config).is_err());
    }
}
