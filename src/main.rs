use std::ffi::OsString;
use std::io::{self, Write};

use anyhow::{Context, Result};
use argh::FromArgs;
use idle_shell::config::{EXIT_FAILURE, Settings};
use idle_shell::{AlarmTimer, Interpreter, logging, signals};

#[derive(FromArgs)]
/// A minimal interactive shell. Takes no arguments; type `exit` to leave.
struct Cli {}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}\nExiting...");
            EXIT_FAILURE
        }
    };
    let _ = io::stdout().flush();
    std::process::exit(code);
}

fn run() -> Result<i32> {
    parse_cli();

    logging::init_logging()?;
    let settings = Settings::from_env();
    tracing::debug!(idle_timeout = ?settings.idle_timeout, "starting");

    signals::install().context("failed to install signal handlers")?;

    let mut shell = Interpreter::with_timer(AlarmTimer::new(settings.idle_timeout));
    let code = shell.repl(io::stdin().lock(), io::stdout())?;
    Ok(code)
}

/// Reject every command-line argument before the loop starts.
fn parse_cli() {
    let args: Vec<OsString> = std::env::args_os().collect();
    let program = args
        .first()
        .map(|a| a.to_string_lossy().into_owned())
        .unwrap_or_else(|| "shell".to_string());
    let rest: Vec<String> = args
        .iter()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

    // Even `--help` is a usage error: the shell accepts no arguments at all.
    if let Err(early) = Cli::from_args(&[&program], &rest) {
        eprint!("{}", early.output);
        if !early.output.ends_with('\n') {
            eprintln!();
        }
        eprintln!("no arguments are allowed. Use {program}");
        std::process::exit(EXIT_FAILURE);
    }
}
