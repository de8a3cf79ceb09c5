use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_PACING_MS: u64 = 600;
pub const DEFAULT_LOG_FILTER: &str = "starquery=info,warn";

/// Runtime settings for the terminal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Pause between transmitting a query and showing its result.
    pub pacing: Duration,
    /// Print the session view as JSON instead of text.
    pub json_view: bool,
    /// Log filter used when `RUST_LOG` is unset or invalid.
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
            json_view: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pacing_ms = parse_u64(
            "STARQUERY_PACING_MS",
            lookup("STARQUERY_PACING_MS"),
            DEFAULT_PACING_MS,
        )?;
        let json_view = parse_bool("STARQUERY_JSON_VIEW", lookup("STARQUERY_JSON_VIEW"), false)?;
        let log_filter =
            lookup("STARQUERY_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Ok(Self {
            pacing: Duration::from_millis(pacing_ms),
            json_view,
            log_filter,
        })
    }
}

fn parse_u64(key: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_bool(
    key: &'static str,
    value: Option<String>,
    default: bool,
) -> Result<bool, ConfigError> {
    match value {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value }),
        },
        None => Ok(default),
    }
}
