//! Simulator configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DASHBOARD_DIR: &str = "dashboard/dist";
pub const DEFAULT_STREAM_INTERVAL_MS: u64 = 1000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid { key: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Built dashboard served at `/`.
    pub dashboard_dir: PathBuf,
    /// Delay between readings on one stream.
    pub stream_interval: Duration,
    /// Base RNG seed; `None` draws from OS entropy per session.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            dashboard_dir: PathBuf::from(DEFAULT_DASHBOARD_DIR),
            stream_interval: Duration::from_millis(DEFAULT_STREAM_INTERVAL_MS),
            seed: None,
        }
    }
}

impl Config {
    /// Build config from process environment.
    ///
    /// Optional:
    /// - `PORT`: default 8000
    /// - `DASHBOARD_DIR`: default `dashboard/dist`
    /// - `STREAM_INTERVAL_MS`: default 1000, must be positive
    /// - `SIMULATOR_SEED`: unset means unseeded
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for any value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for any value that does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => defaults.port,
        };

        let dashboard_dir = get("DASHBOARD_DIR").map_or(defaults.dashboard_dir, PathBuf::from);

        let stream_interval = match get("STREAM_INTERVAL_MS") {
            Some(raw) => {
                let ms: u64 = parse_number("STREAM_INTERVAL_MS", &raw)?;
                if ms == 0 {
                    return Err(invalid("STREAM_INTERVAL_MS", &raw, "must be greater than zero"));
                }
                Duration::from_millis(ms)
            }
            None => defaults.stream_interval,
        };

        let seed = get("SIMULATOR_SEED").map(|raw| parse_number("SIMULATOR_SEED", &raw)).transpose()?;

        Ok(Self { port, dashboard_dir, stream_interval, seed })
    }
}

fn parse_number<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| invalid(key, raw, e))
}

fn invalid(key: &'static str, raw: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid { key, value: raw.to_owned(), reason: reason.to_string() }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
