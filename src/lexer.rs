//! Splitting an input line into a fixed-capacity argument vector.
//!
//! The only delimiter is the ASCII space. There is no quoting, escaping or
//! expansion: every maximal run of non-space bytes is one argument.

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

use crate::config::MAX_ARGS;

const DELIMITER: u8 = b' ';

/// Ordered arguments of one command, borrowed from the input line.
///
/// Holds at most `N` entries, contiguous from index 0. The length marks the
/// end of the list; the null sentinel the OS expects is added when the vector
/// is handed to `execvp`. Tokens past the capacity are dropped.
#[derive(Debug, Clone, Copy)]
pub struct ArgVector<'a, const N: usize = MAX_ARGS> {
    slots: [&'a OsStr; N],
    len: usize,
    truncated: bool,
}

impl<'a, const N: usize> ArgVector<'a, N> {
    /// Tokenize `line` without copying it.
    pub fn tokenize(line: &'a [u8]) -> Self {
        let mut argv = Self {
            slots: [OsStr::new(""); N],
            len: 0,
            truncated: false,
        };

        let mut tokens = line
            .split(|&b| b == DELIMITER)
            .filter(|token| !token.is_empty());
        for slot in argv.slots.iter_mut() {
            match tokens.next() {
                Some(token) => {
                    *slot = OsStr::from_bytes(token);
                    argv.len += 1;
                }
                None => break,
            }
        }
        argv.truncated = tokens.next().is_some();
        argv
    }

    /// The command name, absent for blank input.
    pub fn program(&self) -> Option<&'a OsStr> {
        self.as_slice().first().copied()
    }

    /// The arguments after the command name.
    pub fn args(&self) -> &[&'a OsStr] {
        self.as_slice().get(1..).unwrap_or(&[])
    }

    pub fn as_slice(&self) -> &[&'a OsStr] {
        &self.slots[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a OsStr> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether tokens were dropped because the vector was full.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}
