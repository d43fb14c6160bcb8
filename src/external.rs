use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;

use nix::errno::Errno;
use nix::sys::signal::{SigHandler, Signal, signal};
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, execvp, fork};

use crate::command::{CommandFactory, ExecutableCommand, Flow};
use crate::config::EXIT_FAILURE;
use crate::errors::{Result, ShellError};
use crate::interpreter::Factory;
use crate::lexer::ArgVector;

/// Command that is not a sentinel: run in a forked child via `execvp`.
///
/// The program is resolved by `execvp` itself, so lookup follows the usual
/// PATH rules of the host.
pub struct ExternalCommand {
    argv: Vec<CString>,
}

impl ExternalCommand {
    /// `argv` must be non-empty; index 0 is the program name.
    pub fn new(argv: Vec<CString>) -> Self {
        Self { argv }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(&self, argv: &ArgVector<'_>) -> Option<Box<dyn ExecutableCommand>> {
        c_args(argv).map(|argv| Box::new(ExternalCommand::new(argv)) as Box<dyn ExecutableCommand>)
    }
}

/// Owned, NUL-terminated copies of `argv` for `execvp`; `None` when blank.
///
/// Lines are cut at their first NUL, so conversion only fails for vectors
/// built by hand.
fn c_args(argv: &ArgVector<'_>) -> Option<Vec<CString>> {
    let args = argv
        .iter()
        .map(|arg| CString::new(arg.as_bytes()))
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()?;
    if args.is_empty() { None } else { Some(args) }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(self: Box<Self>) -> Result<Flow> {
        // SAFETY: the shell is single-threaded, and the child only calls
        // execvp and, on failure, writes a message and `_exit`s.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => exec_in_child(&self.argv),
            Ok(ForkResult::Parent { child }) => {
                tracing::debug!(pid = %child, program = ?self.argv[0], "dispatched");
                let status = wait_for(child)?;
                log_status(status);
                Ok(Flow::Continue)
            }
            Err(errno) => Err(ShellError::Fork(errno)),
        }
    }
}

fn exec_in_child(argv: &[CString]) -> ! {
    // The Rust runtime ignores SIGPIPE, and an ignored disposition survives
    // exec; programs expect the default.
    // SAFETY: installs a default disposition, no handler code runs.
    let _ = unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) };
    let errno = match execvp(&argv[0], argv) {
        Ok(never) => match never {},
        Err(errno) => errno,
    };
    eprintln!("exec failed: {}", errno.desc());
    // SAFETY: `_exit` skips atexit handlers and stdio flushing, so the parent's
    // buffered output is not written a second time by the child.
    unsafe { libc::_exit(EXIT_FAILURE) }
}

/// Block until `child` has terminated, restarting after interrupted waits.
fn wait_for(child: Pid) -> Result<WaitStatus> {
    loop {
        match waitpid(child, None) {
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(ShellError::Wait(errno)),
            Ok(status) => return Ok(status),
        }
    }
}

fn log_status(status: WaitStatus) {
    match status {
        WaitStatus::Exited(pid, code) => tracing::debug!(%pid, code, "child exited"),
        WaitStatus::Signaled(pid, signal, core_dumped) => {
            tracing::debug!(%pid, %signal, core_dumped, "child killed by signal")
        }
        other => tracing::debug!(?other, "child changed state"),
    }
}
