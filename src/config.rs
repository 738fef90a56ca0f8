use std::{net::SocketAddr, num::NonZeroU32, str::FromStr, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Server settings, read from the environment (and `.env` if present)
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub rate_limit_per_second: NonZeroU32,
    pub rate_limit_burst: NonZeroU32,
    pub max_concurrent_requests: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: "info".to_string(),
            rate_limit_per_second: NonZeroU32::new(100).unwrap_or(NonZeroU32::MIN),
            rate_limit_burst: NonZeroU32::new(20).unwrap_or(NonZeroU32::MIN),
            max_concurrent_requests: 512,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: var_or(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            rate_limit_per_second: var_or(
                &lookup,
                "RATE_LIMIT_PER_SECOND",
                defaults.rate_limit_per_second,
            )?,
            rate_limit_burst: var_or(&lookup, "RATE_LIMIT_BURST", defaults.rate_limit_burst)?,
            max_concurrent_requests: var_or(
                &lookup,
                "MAX_CONCURRENT_REQUESTS",
                defaults.max_concurrent_requests,
            )?,
            request_timeout: Duration::from_secs(var_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
        })
    }
}

fn var_or<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.rate_limit_per_second.get(), 100);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("RATE_LIMIT_BURST", " 5 "),
            ("REQUEST_TIMEOUT_SECS", "3"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.rate_limit_burst.get(), 5);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let err = config_from(&[("RATE_LIMIT_PER_SECOND", "0")]).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid { name: "RATE_LIMIT_PER_SECOND", .. }
        ));
    }
}
