// src/logging.rs

//! Log output for `stargate`, on STDERR so that stdout stays free for the
//! output of toolchain commands and the `status` report.
//!
//! The filter comes from the first of:
//! 1. `--log-level`
//! 2. `STARGATE_LOG`, as `EnvFilter` directives (`debug`,
//!    `stargate::flow=trace,info`, ...); an unparsable value is ignored
//! 3. `info`

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "STARGATE_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let directives = filter_directives(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;

    Ok(())
}

/// Filter directives for a run.
pub fn filter_directives(cli_level: Option<LogLevel>, env_value: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level.as_directive().to_string();
    }

    env_value
        .map(str::trim)
        .filter(|value| !value.is_empty() && EnvFilter::try_new(value).is_ok())
        .unwrap_or(DEFAULT_DIRECTIVES)
        .to_string()
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
