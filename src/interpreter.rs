use std::io::{BufRead, Write};

use crate::command::{CommandFactory, ExitCode, Flow};
use crate::config::{EXIT_SUCCESS, PROMPT};
use crate::errors::{Result, ShellError};
use crate::input::{InputLine, ReadOutcome};
use crate::lexer::ArgVector;
use crate::timer::SessionTimer;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate: the sentinels and
/// ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The read-tokenize-dispatch loop of the shell.
///
/// Commands are produced by an ordered list of [`CommandFactory`] objects,
/// and every non-blank line re-arms the session timer. See
/// [`Interpreter::with_timer`] for the default command set.
///
/// Example
/// ```
/// use idle_shell::{CountingTimer, Interpreter};
/// let mut sh = Interpreter::with_timer(CountingTimer::default());
/// let mut out = Vec::new();
/// let code = sh.repl(&b"\n   \nexit\n"[..], &mut out).unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(out, b"prompt>prompt>prompt>");
/// ```
pub struct Interpreter<T> {
    commands: Vec<Box<dyn CommandFactory>>,
    timer: T,
}

impl<T: SessionTimer> Interpreter<T> {
    /// Create an interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>, timer: T) -> Self {
        Self { commands, timer }
    }

    /// Create an interpreter with the default commands:
    /// - sentinels: `exit`, `segfault`
    /// - external command launcher, which accepts any other name
    pub fn with_timer(timer: T) -> Self {
        use crate::builtin::{Exit, Segfault};
        use crate::external::ExternalCommand;
        Self::new(
            vec![
                Box::new(Factory::<Exit>::default()),
                Box::new(Factory::<Segfault>::default()),
                Box::new(Factory::<ExternalCommand>::default()),
            ],
            timer,
        )
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Run a single tokenized command.
    ///
    /// The first factory that recognizes the command name wins.
    pub fn run(&mut self, argv: &ArgVector<'_>) -> Result<Flow> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(argv) {
                return cmd.execute();
            }
        }
        let name = argv
            .program()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        Err(ShellError::CommandNotFound(name))
    }

    /// Prompt, read and dispatch until a command ends the session.
    ///
    /// Returns the exit code the process should end with. End of input counts
    /// as a normal exit. Signals never surface here: the handlers in
    /// [`crate::signals`] either end the process or let the blocked call resume.
    pub fn repl<R, W>(&mut self, mut input: R, mut output: W) -> Result<ExitCode>
    where
        R: BufRead,
        W: Write,
    {
        let mut line: InputLine = InputLine::new();
        self.timer.rearm();

        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            if line.read_from(&mut input)? == ReadOutcome::Eof {
                tracing::debug!("end of input");
                writeln!(output)?;
                output.flush()?;
                return Ok(EXIT_SUCCESS);
            }

            let argv: ArgVector<'_> = ArgVector::tokenize(line.content());
            let Some(program) = argv.program() else {
                continue;
            };
            if argv.was_truncated() {
                tracing::debug!(kept = argv.len(), "extra arguments dropped");
            }
            tracing::trace!(?program, args = argv.args().len(), "command entered");

            self.timer.rearm();
            match self.run(&argv) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Terminate(code)) => {
                    output.flush()?;
                    return Ok(code);
                }
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(%err, "command skipped");
                    eprintln!("{err}");
                }
                Err(err) => return Err(err),
            }
        }
    }
}
