//! A minimal interactive shell with an idle timeout.
//!
//! Each prompt reads one bounded line, splits it on spaces into at most ten
//! arguments and runs the named program in a forked child while the shell
//! waits. Two sentinel commands are handled in-process: `exit` ends the
//! session and `segfault` delivers SIGSEGV to the shell itself.
//!
//! Three signals shape the session (see [`signals`]):
//! - SIGALRM after the idle interval ends the process with status 3,
//! - SIGSEGV ends it with status 2,
//! - SIGINT prints a reminder and returns to the prompt.
//!
//! The main entry point is [`Interpreter`]. The public modules expose the
//! bounded [`input`] buffer, the [`lexer`], the [`command`] traits for
//! plugging in other commands and the [`timer`] abstraction.

mod builtin;
pub mod command;
pub mod config;
pub mod errors;
mod external;
pub mod input;
mod interpreter;
pub mod lexer;
pub mod logging;
pub mod signals;
pub mod timer;

/// Re-export of the command loop.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
pub use timer::{AlarmTimer, CountingTimer};
