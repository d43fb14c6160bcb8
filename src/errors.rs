//! Crate-wide error type and result alias.

use nix::errno::Errno;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Unable to fork")]
    Fork(#[source] Errno),

    #[error("waitpid failed")]
    Wait(#[source] Errno),

    #[error("Unable to install handler for {signal}")]
    SignalSetup {
        signal: nix::sys::signal::Signal,
        #[source]
        source: Errno,
    },

    #[error("Unable to raise {signal}")]
    Raise {
        signal: nix::sys::signal::Signal,
        #[source]
        source: Errno,
    },

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("command not found: {0}")]
    CommandNotFound(String),
}

impl ShellError {
    /// Whether the command loop may report this error and keep prompting.
    ///
    /// Everything except an unknown command name ends the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ShellError::CommandNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
