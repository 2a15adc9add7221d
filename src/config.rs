//! # Configuration Module
//!
//! This module defines the runtime configuration of the shopping-list binary,
//! read from environment variables (optionally through a `.env` file).

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

// Constants for configuration defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable console lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("Unknown log format: {other}"),
        }
    }
}

/// Configuration structure for the shopping-list binary
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: Option<String>,
    /// Default tracing filter when RUST_LOG is not set (e.g., "info", "ingredients=debug")
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Maximum pooled database connections
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::default(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse().context("Failed to read LOG_FORMAT")?,
            None => defaults.log_format,
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a positive integer, got '{value}'"))?,
            None => defaults.max_connections,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format,
            max_connections,
        })
    }

    /// The database URL, or an error naming the missing variable
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set")
    }
}
