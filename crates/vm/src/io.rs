//! Input and output collaborators.
//!
//! The engine never touches stdin or stdout directly. `&` and `~` go through
//! [`Input`]; `.` and `,` go through [`Output`]. Any [`std::io::Write`] is an
//! [`Output`], and [`LineInput`] adapts any [`BufRead`]. [`PromptedInput`]
//! announces each read on a separate writer, usually stderr.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::InputError;

/// Source of values for `&` and `~`.
pub trait Input {
    /// Block for an integer.
    fn read_integer(&mut self) -> Result<i64, InputError>;

    /// Block for a single character.
    fn read_char(&mut self) -> Result<char, InputError>;
}

impl<T: Input + ?Sized> Input for &mut T {
    fn read_integer(&mut self) -> Result<i64, InputError> {
        (**self).read_integer()
    }

    fn read_char(&mut self) -> Result<char, InputError> {
        (**self).read_char()
    }
}

/// Sink for `.` and `,`. Text is appended as-is, with no implicit newline.
///
/// Writes may stay buffered until [`Output::flush_text`]; the engine calls it
/// once when a run ends.
pub trait Output {
    fn write_text(&mut self, text: &str) -> io::Result<()>;

    fn flush_text(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<W: Write + ?Sized> Output for W {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.write_all(text.as_bytes())
    }

    fn flush_text(&mut self) -> io::Result<()> {
        self.flush()
    }
}

/// Line-buffered input over any reader.
///
/// `~` hands out the stream one character at a time, line breaks included.
/// `&` skips blank lines and parses the rest of the current line.
pub struct LineInput<R> {
    reader: R,
    pending: VecDeque<char>,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Take the rest of the current line without its line break.
    /// Returns `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>, InputError> {
        if self.pending.is_empty() && !self.fill()? {
            return Ok(None);
        }
        Ok(Some(self.take_line()))
    }

    /// Pull one more line from the reader into the buffer.
    fn fill(&mut self) -> Result<bool, InputError> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Ok(false),
            Ok(_) => {
                self.pending.extend(line.chars());
                Ok(true)
            }
            Err(e) => Err(InputError::Io(e.to_string())),
        }
    }

    fn take_line(&mut self) -> String {
        let mut line = String::new();
        while let Some(c) = self.pending.pop_front() {
            if c == '\n' {
                break;
            }
            line.push(c);
        }
        if line.ends_with('\r') {
            line.pop();
        }
        line
    }
}

impl<R: BufRead> Input for LineInput<R> {
    fn read_integer(&mut self) -> Result<i64, InputError> {
        loop {
            let line = self.read_line()?.ok_or(InputError::Exhausted)?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            return text
                .parse()
                .map_err(|_| InputError::InvalidInteger(text.to_string()));
        }
    }

    fn read_char(&mut self) -> Result<char, InputError> {
        if self.pending.is_empty() && !self.fill()? {
            return Err(InputError::Exhausted);
        }
        self.pending.pop_front().ok_or(InputError::Exhausted)
    }
}

/// Shown before `&` reads.
pub const INTEGER_PROMPT: &str = "Enter a number: ";
/// Shown before `~` reads.
pub const CHAR_PROMPT: &str = "Enter a single character: ";

/// Writes a prompt to `prompts` before every read from `inner`.
///
/// Prompt write failures are ignored; the read still happens.
pub struct PromptedInput<I, W> {
    inner: I,
    prompts: W,
}

impl<I: Input, W: Write> PromptedInput<I, W> {
    pub fn new(inner: I, prompts: W) -> Self {
        Self { inner, prompts }
    }

    fn prompt(&mut self, text: &str) {
        let _ = self
            .prompts
            .write_all(text.as_bytes())
            .and_then(|()| self.prompts.flush());
    }
}

impl<I: Input, W: Write> Input for PromptedInput<I, W> {
    fn read_integer(&mut self) -> Result<i64, InputError> {
        self.prompt(INTEGER_PROMPT);
        self.inner.read_integer()
    }

    fn read_char(&mut self) -> Result<char, InputError> {
        self.prompt(CHAR_PROMPT);
        self.inner.read_char()
    }
}

/// Input that is always exhausted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl Input for NoInput {
    fn read_integer(&mut self) -> Result<i64, InputError> {
        Err(InputError::Exhausted)
    }

    fn read_char(&mut self) -> Result<char, InputError> {
        Err(InputError::Exhausted)
    }
}
