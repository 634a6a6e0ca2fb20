//! Logging Setup
//!
//! Installs the global tracing subscriber for applications embedding the
//! client. `RUST_LOG` takes precedence over the configured level.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the level filter: `RUST_LOG` if set, else `storerate=<level>`
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("storerate={}", config.level).into())
}

/// Install the global subscriber in `pretty` or `json` format
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .context("failed to install json subscriber")?,
        "pretty" => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("failed to install subscriber")?,
        other => anyhow::bail!("unknown log format: {}", other),
    }

    tracing::debug!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}
