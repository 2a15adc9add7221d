//! # Logging Module
//!
//! Installs the global `tracing` subscriber for the binary. `RUST_LOG` takes
//! precedence over the configured level.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, LogFormat};

/// Initialize tracing with the configured filter and output format
pub fn init_logging(config: &AppConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("Invalid log level '{}'", config.log_level))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json())
            .try_init()
            .context("Failed to initialize JSON logging")?,
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true))
            .try_init()
            .context("Failed to initialize logging")?,
    }

    Ok(())
}
