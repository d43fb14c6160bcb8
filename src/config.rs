//! Fixed bounds, exit codes and the runtime [`Settings`] of the shell.
//!
//! The shell reads no configuration files. Everything tunable at runtime comes
//! from environment variables, looked up through a closure so tests can supply
//! their own values instead of touching the process environment.

use std::env as stdenv;
use std::time::Duration;

use crate::command::ExitCode;

/// Capacity of the input line buffer, terminator included.
///
/// At most `LINE_CAPACITY - 1` bytes of a line are read per prompt.
pub const LINE_CAPACITY: usize = 80;

/// Maximum number of tokens (command name included) passed to a command.
pub const MAX_ARGS: usize = 10;

/// Literal written to stdout before every read.
pub const PROMPT: &str = "prompt>";

/// Idle interval used when `IDLE_SHELL_TIMEOUT` is unset or invalid.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

pub const EXIT_SUCCESS: ExitCode = 0;
pub const EXIT_FAILURE: ExitCode = 1;
pub const EXIT_ON_FAULT: ExitCode = 2;
pub const EXIT_ON_TIMEOUT: ExitCode = 3;

/// Environment variable holding the idle interval in whole seconds.
pub const TIMEOUT_VAR: &str = "IDLE_SHELL_TIMEOUT";

/// Environment variable holding the log level, read by [`crate::logging`].
pub const LOG_VAR: &str = "IDLE_SHELL_LOG";

/// Runtime settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// How long the prompt may sit without a non-empty command.
    pub idle_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| stdenv::var(key).ok())
    }

    /// Resolve settings from an arbitrary key lookup.
    ///
    /// A timeout of zero would disarm the alarm entirely, so it is treated
    /// like any other invalid value and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let idle_timeout = match lookup(TIMEOUT_VAR) {
            None => DEFAULT_IDLE_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(secs) if secs > 0 => Duration::from_secs(u64::from(secs)),
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "ignoring invalid {TIMEOUT_VAR}, using {}s",
                        DEFAULT_IDLE_TIMEOUT.as_secs()
                    );
                    DEFAULT_IDLE_TIMEOUT
                }
            },
        };

        Self { idle_timeout }
    }
}
