//! Logging setup.
//!
//! Logs and line diagnostics go to stderr so that stdout can carry CSV or
//! TSDATA output.

use crate::config::LogLevel;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a full filter directive
pub const LOG_FILTER_ENV: &str = "TSDATA_LOG";

/// Build the log filter
///
/// Quiet always wins. Otherwise `TSDATA_LOG` is used when it parses, then
/// the configured level.
#[must_use]
pub fn filter(quiet: bool, level: LogLevel) -> EnvFilter {
    if quiet {
        return EnvFilter::new("off");
    }
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Initialize the global subscriber
pub fn init(quiet: bool, level: LogLevel) {
    let stderr = std::io::stderr();
    tracing_subscriber::fmt()
        .with_env_filter(filter(quiet, level))
        .with_writer(std::io::stderr)
        .with_ansi(stderr.is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_quiet_turns_everything_off() {
        assert_eq!(
            filter(true, LogLevel::Trace).max_level_hint(),
            Some(LevelFilter::OFF)
        );
    }
}
