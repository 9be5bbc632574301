use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings, read from the environment after loading `.env`.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub log_filter: String,
    pub max_connections: u32,
    pub analytics_window: chrono::Duration,
    pub status_heartbeat: Duration,
}

impl Config {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    pub const DEFAULT_ANALYTICS_WINDOW_DAYS: i64 = 14;
    pub const DEFAULT_STATUS_HEARTBEAT_SECS: u64 = 15 * 60;

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".into());
        let max_connections = parse_or(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            Self::DEFAULT_MAX_CONNECTIONS,
        )?;
        let window_days: i64 = parse_or(
            &lookup,
            "ANALYTICS_WINDOW_DAYS",
            Self::DEFAULT_ANALYTICS_WINDOW_DAYS,
        )?;
        let heartbeat_secs: u64 = parse_or(
            &lookup,
            "STATUS_HEARTBEAT_SECS",
            Self::DEFAULT_STATUS_HEARTBEAT_SECS,
        )?;

        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: max_connections.to_string(),
            });
        }
        let analytics_window = chrono::Duration::try_days(window_days)
            .filter(|_| window_days > 0)
            .ok_or_else(|| ConfigError::Invalid {
                key: "ANALYTICS_WINDOW_DAYS",
                value: window_days.to_string(),
            })?;

        Ok(Self {
            database_url,
            log_filter,
            max_connections,
            analytics_window,
            status_heartbeat: Duration::from_secs(heartbeat_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.analytics_window, chrono::Duration::days(14));
        assert_eq!(config.status_heartbeat, Duration::from_secs(900));
    }

    #[test]
    fn missing_database_url_is_reported() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn unparsable_numbers_are_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/radio"),
            ("STATUS_HEARTBEAT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "STATUS_HEARTBEAT_SECS",
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/radio"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. }));
    }

    #[test]
    fn analytics_window_out_of_range_is_rejected() {
        for days in ["0", "-3", "200000000000000"] {
            let err = Config::from_lookup(lookup(&[
                ("DATABASE_URL", "postgres://localhost/radio"),
                ("ANALYTICS_WINDOW_DAYS", days),
            ]))
            .unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    key: "ANALYTICS_WINDOW_DAYS",
                    value: days.to_string(),
                }
            );
        }
    }
}
