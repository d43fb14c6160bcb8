//! Bounded line buffer the command loop reads into.

use std::io::{BufRead, ErrorKind, Result as IoResult};

use crate::config::LINE_CAPACITY;

/// Result of a single [`InputLine::read_from`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line (possibly empty, possibly cut at capacity) is in the buffer.
    Line,
    /// The stream ended before any byte was read.
    Eof,
}

/// Fixed-capacity input buffer, allocated once and overwritten every prompt.
///
/// One byte of the capacity is reserved for the terminator, so at most
/// `N - 1` bytes are consumed per read. Bytes past that limit stay in the
/// reader and come back as the next line.
#[derive(Debug, Clone)]
pub struct InputLine<const N: usize = LINE_CAPACITY> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for InputLine<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> InputLine<N> {
    pub fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    /// Read one line from `reader`, replacing the previous contents.
    ///
    /// Reading stops after a newline or once `N - 1` bytes are buffered.
    /// Afterwards the trailing newline, if any, is dropped and the line is cut
    /// at its first NUL byte. Interrupted reads are retried.
    pub fn read_from<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> IoResult<ReadOutcome> {
        let limit = N.saturating_sub(1);
        self.len = 0;
        let mut saw_eof = false;

        while self.len < limit {
            let available = match reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if available.is_empty() {
                saw_eof = true;
                break;
            }

            let room = limit - self.len;
            let window = &available[..available.len().min(room)];
            let (take, done) = match window.iter().position(|&b| b == b'\n') {
                Some(pos) => (pos + 1, true),
                None => (window.len(), false),
            };
            self.buf[self.len..self.len + take].copy_from_slice(&window[..take]);
            self.len += take;
            reader.consume(take);
            if done {
                break;
            }
        }

        if saw_eof && self.len == 0 {
            return Ok(ReadOutcome::Eof);
        }

        self.strip_terminator();
        if let Some(nul) = self.content().iter().position(|&b| b == 0) {
            self.len = nul;
        }
        Ok(ReadOutcome::Line)
    }

    /// The current line without its terminator.
    pub fn content(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn strip_terminator(&mut self) {
        if self.len >= 1 && self.buf[self.len - 1] == b'\n' {
            self.len -= 1;
            self.buf[self.len] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Read};

    #[test]
    fn test_reads_one_line_at_a_time() {
        let mut reader: &[u8] = b"ls -l\necho hi\n";
        let mut line = InputLine::<80>::new();

        assert_eq!(line.read_from(&mut reader).unwrap(), ReadOutcome::Line);
        assert_eq!(line.content(), b"ls -l");
        assert_eq!(line.read_from(&mut reader).unwrap(), ReadOutcome::Line);
        assert_eq!(line.content(), b"echo hi");
        assert_eq!(line.read_from(&mut reader).unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn test_bare_newline_is_empty_line() {
        let mut reader: &[u8] = b"\n";
        let mut line = InputLine::<80>::new();
        assert_eq!(line.read_from(&mut reader).unwrap(), ReadOutcome::Line);
        assert!(line.is_empty());
    }

    #[test]
    fn test_overlong_line_leaves_remainder_for_next_read() {
        let mut reader: &[u8] = b"abcdefgh\n";
        let mut line = InputLine::<5>::new();

        line.read_from(&mut reader).unwrap();
        assert_eq!(line.content(), b"abcd");
        line.read_from(&mut reader).unwrap();
        assert_eq!(line.content(), b"efgh");
        // the newline alone was still in the stream
        line.read_from(&mut reader).unwrap();
        assert!(line.is_empty());
        assert_eq!(line.read_from(&mut reader).unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn test_final_line_without_newline_is_kept() {
        let mut reader: &[u8] = b"exit";
        let mut line = InputLine::<80>::new();
        assert_eq!(line.read_from(&mut reader).unwrap(), ReadOutcome::Line);
        assert_eq!(line.content(), b"exit");
    }

    #[test]
    fn test_cut_at_first_nul() {
        let mut reader: &[u8] = b"echo a\0b\n";
        let mut line = InputLine::<80>::new();
        line.read_from(&mut reader).unwrap();
        assert_eq!(line.content(), b"echo a");
    }

    #[test]
    fn test_previous_contents_are_replaced() {
        let mut reader: &[u8] = b"a long first line\nx\n";
        let mut line = InputLine::<80>::new();
        line.read_from(&mut reader).unwrap();
        line.read_from(&mut reader).unwrap();
        assert_eq!(line.content(), b"x");
    }

    /// Reader that fails with `Interrupted` before every successful read.
    struct Flaky<'a> {
        data: &'a [u8],
        interrupt_next: bool,
    }

    impl Read for Flaky<'_> {
        fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
            if self.interrupt_next {
                self.interrupt_next = false;
                return Err(ErrorKind::Interrupted.into());
            }
            self.interrupt_next = true;
            self.data.read(out)
        }
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let mut reader = BufReader::with_capacity(
            2,
            Flaky {
                data: b"echo hi\n",
                interrupt_next: true,
            },
        );
        let mut line = InputLine::<80>::new();
        assert_eq!(line.read_from(&mut reader).unwrap(), ReadOutcome::Line);
        assert_eq!(line.content(), b"echo hi");
    }
}
