//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout carries only the report.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

const NOISY_CRATES: &str = "hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn";

pub fn init(config: &LoggingConfig) -> Result<()> {
    // RUST_LOG takes precedence over the configured default level.
    let mut env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_level));

    let filter_string = format!("{},{}", env_filter, NOISY_CRATES);
    env_filter = EnvFilter::try_new(&filter_string).unwrap_or(env_filter);

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}
