// ABOUTME: Environment-based server configuration with validated defaults
// ABOUTME: Parses port, database URL, logging and registration settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{defaults, env_config};
use crate::errors::{AppError, AppResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Full human-readable lines
    #[default]
    Pretty,
    /// Condensed single-line output
    Compact,
    /// Newline-delimited JSON for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "full" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(AppError::config(format!(
                "Unknown log format '{other}' (expected pretty, compact or json)"
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `info` or `spotter_server=debug`
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_owned(),
            format: LogFormat::default(),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// `SQLite` connection URL
    pub database_url: String,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Likes granted to an athlete at registration
    pub default_remaining_likes: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            database_url: defaults::DATABASE_URL.to_owned(),
            logging: LoggingConfig::default(),
            default_remaining_likes: defaults::REMAINING_LIKES,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is set but cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        let http_port = parse_env(env_config::HTTP_PORT, defaults::HTTP_PORT)?;
        if http_port == 0 {
            return Err(AppError::config(format!(
                "{} must be a non-zero port",
                env_config::HTTP_PORT
            )));
        }

        let database_url = env::var(env_config::DATABASE_URL)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| defaults::DATABASE_URL.to_owned());

        let level = env::var(env_config::LOG_LEVEL)
            .ok()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| defaults::LOG_LEVEL.to_owned());

        let format = match env::var(env_config::LOG_FORMAT) {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => LogFormat::default(),
        };

        let default_remaining_likes =
            parse_env(env_config::DEFAULT_LIKES, defaults::REMAINING_LIKES)?;

        Ok(Self {
            http_port,
            database_url,
            logging: LoggingConfig { level, format },
            default_remaining_likes,
        })
    }
}

fn parse_env<T>(name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid value for {name}: {e}"))),
        _ => Ok(default),
    }
}
