//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The level comes from the `IDLE_SHELL_LOG` environment variable (e.g.
//! "info", "debug") and defaults to `warn`, which keeps an interactive
//! session quiet.
//!
//! Logs go to STDERR so stdout carries only prompts, notices and command
//! output. Signal handlers never log; they write raw bytes instead.

use anyhow::{Result, anyhow};
use tracing_subscriber::fmt;

use crate::config::LOG_VAR;

/// Initialise the global logging subscriber.
///
/// Call once at startup, before the signal handlers are installed.
pub fn init_logging() -> Result<()> {
    let level = std::env::var(LOG_VAR)
        .ok()
        .and_then(|s| parse_level_str(&s))
        .unwrap_or(tracing::Level::WARN);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;

    Ok(())
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
