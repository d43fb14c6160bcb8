use std::ffi::OsStr;

use nix::sys::signal::{Signal, raise};

use crate::command::{CommandFactory, ExecutableCommand, Flow};
use crate::config::{EXIT_ON_FAULT, EXIT_SUCCESS};
use crate::errors::{Result, ShellError};
use crate::interpreter::Factory;
use crate::lexer::ArgVector;

/// Sentinel commands handled inside the shell process.
///
/// A sentinel matches on its exact, case-sensitive name. Any further
/// arguments are ignored.
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "exit".
    fn name() -> &'static str;

    fn create() -> Self;

    fn execute(self) -> Result<Flow>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>) -> Result<Flow> {
        T::execute(*self)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, argv: &ArgVector<'_>) -> Option<Box<dyn ExecutableCommand>> {
        if argv.program() == Some(OsStr::new(T::name())) {
            Some(Box::new(T::create()))
        } else {
            None
        }
    }
}

/// Leave the shell with a success status.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn create() -> Self {
        Exit
    }

    fn execute(self) -> Result<Flow> {
        tracing::debug!("exit requested");
        Ok(Flow::Terminate(EXIT_SUCCESS))
    }
}

/// Deliver SIGSEGV to the shell itself to exercise the fault handler.
pub struct Segfault;

impl BuiltinCommand for Segfault {
    fn name() -> &'static str {
        "segfault"
    }

    fn create() -> Self {
        Segfault
    }

    fn execute(self) -> Result<Flow> {
        tracing::debug!("raising SIGSEGV on request");
        raise(Signal::SIGSEGV).map_err(|source| ShellError::Raise {
            signal: Signal::SIGSEGV,
            source,
        })?;
        // The installed handler never returns; this is reached only if the
        // signal was blocked or ignored.
        Ok(Flow::Terminate(EXIT_ON_FAULT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_matches_exact_name_only() {
        let factory = Factory::<Exit>::default();
        assert!(factory.try_create(&ArgVector::tokenize(b"exit")).is_some());
        assert!(factory.try_create(&ArgVector::tokenize(b"exit now")).is_some());
        assert!(factory.try_create(&ArgVector::tokenize(b"Exit")).is_none());
        assert!(factory.try_create(&ArgVector::tokenize(b"exit2")).is_none());
        assert!(factory.try_create(&ArgVector::tokenize(b"echo exit")).is_none());
    }

    #[test]
    fn test_exit_terminates_with_success() {
        let cmd = Factory::<Exit>::default()
            .try_create(&ArgVector::tokenize(b"exit"))
            .unwrap();
        assert_eq!(cmd.execute().unwrap(), Flow::Terminate(0));
    }

    #[test]
    fn test_segfault_matches_exact_name_only() {
        let factory = Factory::<Segfault>::default();
        assert!(factory.try_create(&ArgVector::tokenize(b"segfault")).is_some());
        assert!(factory.try_create(&ArgVector::tokenize(b"SEGFAULT")).is_none());
        assert!(factory.try_create(&ArgVector::tokenize(b"seg fault")).is_none());
    }
}
