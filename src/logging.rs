//! Tracing setup for the stem-splitter binary.
//!
//! Events go to `stderr` so the separation summary on `stdout` stays clean.
//! `RUST_LOG` picks the level (default `info`); [`SplitterConfig::log_format`]
//! picks plain or JSON lines.

use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, SplitterConfig};

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

#[derive(Debug, Error)]
#[error("failed to install tracing subscriber: {source}")]
pub struct LoggingError {
    #[source]
    source: tracing_subscriber::util::TryInitError,
}

/// Install the global subscriber for `cfg`. Only the first call has an effect;
/// returns the format that ended up installed.
pub fn init_logging(cfg: &SplitterConfig) -> Result<LogFormat, LoggingError> {
    if let Some(format) = INSTALLED.get() {
        return Ok(*format);
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let fmt_layer = match cfg.log_format {
        LogFormat::Json => fmt_layer.json().with_current_span(true).boxed(),
        LogFormat::Human => fmt_layer.with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError { source })?;

    Ok(*INSTALLED.get_or_init(|| cfg.log_format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_install_wins() {
        let json = SplitterConfig::default().with_log_format(LogFormat::Json);
        let human = SplitterConfig::default();

        let installed = init_logging(&json).unwrap();
        assert_eq!(init_logging(&human).unwrap(), installed);
    }
}
