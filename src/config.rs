use std::env;
use std::time::Duration;

use derive_more::{Display, Error};

use crate::models::ReportBasis;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[display(fmt = "environment variable '{}' must be set", _0)]
    Missing(#[error(not(source))] &'static str),

    #[display(fmt = "environment variable '{}' has invalid value '{}'", name, value)]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub jwt_secret: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub report_basis: ReportBasis,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port: parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?,
            jwt_secret: required("JWT_SECRET")?,
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                lookup("DB_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            db_acquire_timeout: Duration::from_secs(parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                lookup("DB_ACQUIRE_TIMEOUT_SECS"),
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?),
            report_basis: parse_or("REPORT_BASIS", lookup("REPORT_BASIS"), ReportBasis::default())?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_values_are_absent() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/levelup"),
            ("JWT_SECRET", "secret"),
        ]))
        .expect("config");
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.report_basis, ReportBasis::GameOwner);
    }

    #[test]
    fn missing_database_url_is_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", "secret")]))
            .expect_err("must fail");
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/levelup"),
            ("JWT_SECRET", "secret"),
            ("PORT", "eighty"),
        ]))
        .expect_err("must fail");
        assert_eq!(
            err,
            ConfigError::Invalid { name: "PORT", value: "eighty".to_string() }
        );
    }

    #[test]
    fn report_basis_is_configurable() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/levelup"),
            ("JWT_SECRET", "secret"),
            ("REPORT_BASIS", "attendee"),
        ]))
        .expect("config");
        assert_eq!(config.report_basis, ReportBasis::Attendee);
    }
}
