use std::net::SocketAddr;
use std::time::Duration;

use pod_readiness::{ReadinessError, ReadinessMode};
use thiserror::Error;

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_BODY_SIZE: usize = 64 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address '{value}': {source}")]
    Address {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid {name} '{value}'")]
    Number { name: &'static str, value: String },
    #[error(transparent)]
    Mode(#[from] ReadinessError),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub address: SocketAddr,
    pub mode: ReadinessMode,
    pub max_body_size: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            mode: ReadinessMode::default(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Read configuration through `get` instead of the process environment,
    /// so tests never have to mutate global state.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let address = get("POD_READINESS_ADDRESS")
            .or_else(|| get("ADDRESS"))
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        let address = address
            .parse()
            .map_err(|source| ConfigError::Address {
                value: address.clone(),
                source,
            })?;

        let mode = match get("POD_READINESS_MODE") {
            Some(raw) => raw.parse()?,
            None => ReadinessMode::default(),
        };

        let max_body_size = match get("MAX_HTTP_BODY_SIZE") {
            Some(raw) => parse_number("MAX_HTTP_BODY_SIZE", raw)?,
            None => DEFAULT_MAX_BODY_SIZE,
        };

        let request_timeout = match get("POD_READINESS_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("POD_READINESS_REQUEST_TIMEOUT_SECS", raw)?),
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            address,
            mode,
            max_body_size,
            request_timeout,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Number { name, value: raw })
}

/// Build the log filter string: `POD_READINESS_LOG_LEVEL`, then `RUST_LOG`, then `info`.
pub fn log_filter_with<F>(mut get: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    get("POD_READINESS_LOG_LEVEL")
        .or_else(|| get("RUST_LOG"))
        .unwrap_or_else(|| "info".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl FnMut(&str) -> Option<String> {
        move |k: &str| {
            pairs
                .iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg.address, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.mode, ReadinessMode::WithKeys);
        assert_eq!(cfg.max_body_size, DEFAULT_MAX_BODY_SIZE);
        assert_eq!(cfg.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn reads_values() {
        let cfg = Config::from_env_with(lookup(&[
            ("POD_READINESS_ADDRESS", "127.0.0.1:9000"),
            ("POD_READINESS_MODE", "direct"),
            ("MAX_HTTP_BODY_SIZE", "1024"),
            ("POD_READINESS_REQUEST_TIMEOUT_SECS", "3"),
        ]))
        .expect("cfg");
        assert_eq!(cfg.address.port(), 9000);
        assert_eq!(cfg.mode, ReadinessMode::Direct);
        assert_eq!(cfg.max_body_size, 1024);
        assert_eq!(cfg.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn address_falls_back_to_generic_var() {
        let cfg = Config::from_env_with(lookup(&[("ADDRESS", "127.0.0.1:3000")])).expect("cfg");
        assert_eq!(cfg.address.port(), 3000);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_env_with(lookup(&[("POD_READINESS_ADDRESS", "nowhere")])).unwrap_err();
        assert!(err.to_string().contains("nowhere"));

        let err = Config::from_env_with(lookup(&[("POD_READINESS_MODE", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Mode(ReadinessError::InvalidMode(_))));

        let err = Config::from_env_with(lookup(&[("MAX_HTTP_BODY_SIZE", "lots")])).unwrap_err();
        assert!(err.to_string().contains("MAX_HTTP_BODY_SIZE"));
    }

    #[test]
    fn log_filter_priority() {
        let both = log_filter_with(lookup(&[
            ("POD_READINESS_LOG_LEVEL", "debug"),
            ("RUST_LOG", "warn"),
        ]));
        assert_eq!(both, "debug");
        assert_eq!(log_filter_with(lookup(&[("RUST_LOG", "warn")])), "warn");
        assert_eq!(log_filter_with(|_| None), "info");
    }
}
