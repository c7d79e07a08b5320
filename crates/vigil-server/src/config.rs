use std::time::Duration;

use axum::http::StatusCode;

pub const ENV_ADDRESS: &str = "VIGIL_ADDRESS";
pub const ENV_UNAVAILABLE_STATUS_CODE: &str = "VIGIL_UNAVAILABLE_STATUS_CODE";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "VIGIL_REQUEST_TIMEOUT_SECS";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_TCP_PROBES: &str = "VIGIL_TCP_PROBES";

const DEFAULT_UNAVAILABLE_STATUS_CODE: StatusCode = StatusCode::SERVICE_UNAVAILABLE;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No listen address configured; the service stays off.
    #[error("status service disabled: VIGIL_ADDRESS is not set")]
    Disabled,

    #[error("invalid listen address `{0}`, expected host:port")]
    InvalidAddress(String),

    #[error("invalid unavailable status code `{0}`, expected 100-599")]
    InvalidStatusCode(String),

    #[error("invalid request timeout `{0}`, expected whole seconds")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone)]
pub struct StatusConfig {
    pub address: String,
    /// Returned when an aggregation short-circuits.
    pub unavailable_status_code: StatusCode,
    pub request_timeout: Duration,
    pub database_url: Option<String>,
    pub tcp_probes: String,
}

impl StatusConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let address = lookup(ENV_ADDRESS)
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .ok_or(ConfigError::Disabled)?;
        validate_address(&address)?;

        let unavailable_status_code = match lookup(ENV_UNAVAILABLE_STATUS_CODE) {
            Some(raw) => parse_status_code(&raw)?,
            None => DEFAULT_UNAVAILABLE_STATUS_CODE,
        };

        let request_timeout = match lookup(ENV_REQUEST_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?,
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            address,
            unavailable_status_code,
            request_timeout,
            database_url: lookup(ENV_DATABASE_URL).filter(|url| !url.trim().is_empty()),
            tcp_probes: lookup(ENV_TCP_PROBES).unwrap_or_default(),
        })
    }
}

fn validate_address(address: &str) -> Result<(), ConfigError> {
    match address.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => Ok(()),
        _ => Err(ConfigError::InvalidAddress(address.to_string())),
    }
}

fn parse_status_code(raw: &str) -> Result<StatusCode, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .ok()
        .filter(|code| (100..=599).contains(code))
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| ConfigError::InvalidStatusCode(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<StatusConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StatusConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_address_disables_the_service() {
        assert!(matches!(load(&[]), Err(ConfigError::Disabled)));
        assert!(matches!(load(&[(ENV_ADDRESS, "  ")]), Err(ConfigError::Disabled)));
    }

    #[test]
    fn defaults_are_applied() {
        let config = load(&[(ENV_ADDRESS, "127.0.0.1:2114")]).unwrap();
        assert_eq!(config.address, "127.0.0.1:2114");
        assert_eq!(config.unavailable_status_code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.database_url.is_none());
        assert!(config.tcp_probes.is_empty());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            (ENV_ADDRESS, "localhost:8080"),
            (ENV_UNAVAILABLE_STATUS_CODE, "500"),
            (ENV_REQUEST_TIMEOUT_SECS, "10"),
            (ENV_DATABASE_URL, "vigil.db"),
            (ENV_TCP_PROBES, "redis=127.0.0.1:6379"),
        ])
        .unwrap();
        assert_eq!(config.unavailable_status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.database_url.as_deref(), Some("vigil.db"));
        assert_eq!(config.tcp_probes, "redis=127.0.0.1:6379");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[(ENV_ADDRESS, "no-port")]),
            Err(ConfigError::InvalidAddress(_))
        ));
        assert!(matches!(
            load(&[(ENV_ADDRESS, ":80")]),
            Err(ConfigError::InvalidAddress(_))
        ));
        assert!(matches!(
            load(&[(ENV_ADDRESS, "0.0.0.0:80"), (ENV_UNAVAILABLE_STATUS_CODE, "600")]),
            Err(ConfigError::InvalidStatusCode(_))
        ));
        assert!(matches!(
            load(&[(ENV_ADDRESS, "0.0.0.0:80"), (ENV_UNAVAILABLE_STATUS_CODE, "abc")]),
            Err(ConfigError::InvalidStatusCode(_))
        ));
        assert!(matches!(
            load(&[(ENV_ADDRESS, "0.0.0.0:80"), (ENV_REQUEST_TIMEOUT_SECS, "0")]),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }
}
