use std::env;

use thiserror::Error;

use atc_metar::DEFAULT_BASE_URL;
use atc_utils::parse::CompactDuration;

pub const DEFAULT_PURGE_LIMIT_ADMIN: u16 = 200;
pub const DEFAULT_PURGE_LIMIT: u16 = 50;
pub const DEFAULT_TIMEOUT: &str = "10m";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("environment variable {key} has an invalid value `{value}`")]
    Invalid { key: &'static str, value: String },
}

/// Process-wide settings, built once at startup and shared read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotConfig {
    pub log_channel_id: u64,
    pub metar_api_key: Option<String>,
    pub metar_base_url: String,
    pub purge_limit_admin: u16,
    pub purge_limit: u16,
    pub default_timeout: CompactDuration,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let log_channel_raw = read("LOG_CHANNEL_ID").ok_or(ConfigError::Missing("LOG_CHANNEL_ID"))?;
        let log_channel_id = log_channel_raw
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or(ConfigError::Invalid {
                key: "LOG_CHANNEL_ID",
                value: log_channel_raw,
            })?;

        let purge_limit_admin =
            parse_limit(read("PURGE_LIMIT_ADMIN"), "PURGE_LIMIT_ADMIN", DEFAULT_PURGE_LIMIT_ADMIN)?;
        let purge_limit =
            parse_limit(read("PURGE_LIMIT_DEFAULT"), "PURGE_LIMIT_DEFAULT", DEFAULT_PURGE_LIMIT)?;

        let timeout_raw = read("DEFAULT_TIMEOUT").unwrap_or_else(|| DEFAULT_TIMEOUT.to_owned());
        let default_timeout = timeout_raw
            .parse::<CompactDuration>()
            .map_err(|_| ConfigError::Invalid {
                key: "DEFAULT_TIMEOUT",
                value: timeout_raw.clone(),
            })?;

        Ok(Self {
            log_channel_id,
            metar_api_key: read("METAR_API_KEY"),
            metar_base_url: read("METAR_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            purge_limit_admin,
            purge_limit,
            default_timeout,
        })
    }

    /// Purge cap for a caller, depending on whether they are an administrator.
    pub fn purge_limit_for(&self, administrator: bool) -> u16 {
        if administrator {
            self.purge_limit_admin
        } else {
            self.purge_limit
        }
    }
}

fn parse_limit(raw: Option<String>, key: &'static str, default: u16) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse::<u16>()
            .ok()
            .filter(|limit| *limit > 0)
            .ok_or(ConfigError::Invalid { key, value }),
    }
}
