use crate::errors::Result;
use crate::lexer::ArgVector;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// What the command loop does after a command has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Show the prompt again.
    Continue,
    /// Leave the loop; the process exits with this code.
    Terminate(ExitCode),
}

/// Object-safe trait for any command the shell can run.
///
/// Implemented by the two sentinels and by the external launcher.
pub trait ExecutableCommand {
    /// Executes the command, consuming it.
    fn execute(self: Box<Self>) -> Result<Flow>;
}

/// Factory that tries to create a command from a tokenized line.
///
/// Returns `None` when the factory doesn't recognize the command name.
/// Factories are queried in order and the first match wins.
pub trait CommandFactory {
    /// Attempt to create a command for `argv`, which is never empty.
    fn try_create(&self, argv: &ArgVector<'_>) -> Option<Box<dyn ExecutableCommand>>;
}
