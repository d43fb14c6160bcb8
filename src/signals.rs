//! Process-wide handlers for the idle alarm, memory faults and interrupts.
//!
//! Handlers are installed once at startup with `SA_RESTART`, so a blocking
//! read or wait that a signal interrupts is resumed rather than failed.
//!
//! What a handler does for a given signal number is decided by the pure
//! function [`disposition`]. The handler itself only issues raw `write(2)`
//! calls and `_exit(2)`: it never allocates, takes a lock or touches the
//! command loop's buffers.

use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

use crate::command::ExitCode;
use crate::config::{EXIT_FAILURE, EXIT_ON_FAULT, EXIT_ON_TIMEOUT};
use crate::errors::{Result, ShellError};

/// Signals the shell takes over.
pub const HANDLED: [Signal; 3] = [Signal::SIGALRM, Signal::SIGSEGV, Signal::SIGINT];

pub const TIMEOUT_NOTICE: &str = "\nThe session has expired.\nExiting...\n";
pub const FAULT_NOTICE: &str = "\nA segmentation fault has been detected.\nExiting... \n";
// Ends with the prompt since the loop is still blocked in its read.
pub const INTERRUPT_NOTICE: &str = "\nGood try...I don’t die that easily.\n\
Enter 'exit' at the prompt to terminate this shell.\nprompt>";
pub const UNEXPECTED_NOTICE: &str = "Invalid signal passed by sigaction\nExiting...\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn fd(self) -> libc::c_int {
        match self {
            Stream::Stdout => libc::STDOUT_FILENO,
            Stream::Stderr => libc::STDERR_FILENO,
        }
    }
}

/// Reaction to one delivered signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Print the notice and end the process.
    Terminate {
        stream: Stream,
        notice: &'static str,
        code: ExitCode,
    },
    /// Print the notice and return to the interrupted code.
    Resume {
        stream: Stream,
        notice: &'static str,
    },
}

/// Map a raw signal number to what the handler must do.
pub fn disposition(signo: libc::c_int) -> Disposition {
    match signo {
        libc::SIGALRM => Disposition::Terminate {
            stream: Stream::Stdout,
            notice: TIMEOUT_NOTICE,
            code: EXIT_ON_TIMEOUT,
        },
        libc::SIGSEGV => Disposition::Terminate {
            stream: Stream::Stderr,
            notice: FAULT_NOTICE,
            code: EXIT_ON_FAULT,
        },
        libc::SIGINT => Disposition::Resume {
            stream: Stream::Stdout,
            notice: INTERRUPT_NOTICE,
        },
        _ => Disposition::Terminate {
            stream: Stream::Stderr,
            notice: UNEXPECTED_NOTICE,
            code: EXIT_FAILURE,
        },
    }
}

extern "C" fn on_signal(signo: libc::c_int) {
    match disposition(signo) {
        Disposition::Terminate {
            stream,
            notice,
            code,
        } => {
            write_raw(stream, notice);
            // SAFETY: `_exit` is async-signal-safe.
            unsafe { libc::_exit(code) }
        }
        Disposition::Resume { stream, notice } => write_raw(stream, notice),
    }
}

/// Write all of `msg` with `write(2)`, which is async-signal-safe.
///
/// The descriptor is written directly, so nothing is left in a userspace
/// buffer when the process exits right after.
fn write_raw(stream: Stream, msg: &str) {
    let saved_errno = nix::errno::Errno::last_raw();
    let mut rest = msg.as_bytes();
    while !rest.is_empty() {
        // SAFETY: the pointer and length describe a live, immutable slice.
        let n = unsafe { libc::write(stream.fd(), rest.as_ptr().cast(), rest.len()) };
        if n < 0 {
            if nix::errno::Errno::last() == nix::errno::Errno::EINTR {
                continue;
            }
            break;
        }
        rest = &rest[n as usize..];
    }
    nix::errno::Errno::set_raw(saved_errno);
}

/// Install [`on_signal`] for every signal in [`HANDLED`].
///
/// Call once, before the first prompt.
pub fn install() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(on_signal),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    for signal in HANDLED {
        // SAFETY: `on_signal` only performs async-signal-safe calls.
        unsafe { sigaction(signal, &action) }
            .map_err(|source| ShellError::SignalSetup { signal, source })?;
        tracing::debug!(%signal, "handler installed");
    }
    Ok(())
}
