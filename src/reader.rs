//! Acquiring command lines from the user.
//!
//! Two readers are provided: [`StreamReader`] for plain streams (pipes,
//! files, tests) and [`EditorReader`] for interactive terminals, backed by
//! `rustyline`. Both strip the line terminator. Lines are returned as
//! [`OsString`] so bytes that are not valid UTF-8 survive up to the program
//! that receives them.

use crate::error::ShellError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::ffi::OsString;
use std::io::{BufRead, Write};
use tracing::trace;

/// Result of one successful read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// One line of input without its terminator.
    Line(OsString),
    /// The input is exhausted.
    Eof,
}

/// Source of command lines.
pub trait LineReader {
    /// Show `prompt` and read the next line.
    ///
    /// End of input is [`ReadOutcome::Eof`], not an error. Any `Err` is fatal
    /// to the shell.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError>;
}

/// Reads lines from any buffered stream, writing the prompt to `output`.
pub struct StreamReader<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StreamReader<R, W> {
    /// Read lines from `input`, writing prompts to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the underlying input and prompt output.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> LineReader for StreamReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        write!(self.output, "{prompt}").map_err(ShellError::Read)?;
        self.output.flush().map_err(ShellError::Read)?;

        let mut line = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut line)
            .map_err(ShellError::Read)?;
        if read == 0 {
            return Ok(ReadOutcome::Eof);
        }

        trace!(bytes = read, "line read");
        strip_terminator(&mut line);
        Ok(ReadOutcome::Line(into_os_string(line)))
    }
}

fn strip_terminator(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}

#[cfg(unix)]
fn into_os_string(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn into_os_string(bytes: Vec<u8>) -> OsString {
    String::from_utf8_lossy(&bytes).into_owned().into()
}

/// Interactive reader with line editing and in-memory history.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    /// Set up the terminal editor with an empty history.
    pub fn new() -> Result<Self, ShellError> {
        let editor = DefaultEditor::new().map_err(ShellError::Editor)?;
        Ok(Self { editor })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        let result = self.editor.readline(prompt);
        if let Ok(line) = &result {
            trace!(bytes = line.len(), "line read");
            if belongs_in_history(line) {
                self.editor
                    .add_history_entry(line.as_str())
                    .map_err(ShellError::Editor)?;
            }
        }
        editor_outcome(result)
    }
}

/// Blank lines are not worth recalling.
fn belongs_in_history(line: &str) -> bool {
    !line.trim().is_empty()
}

/// Map what the line editor returned onto the reader contract.
fn editor_outcome(result: Result<String, ReadlineError>) -> Result<ReadOutcome, ShellError> {
    match result {
        Ok(line) => Ok(ReadOutcome::Line(line.into())),
        // Ctrl-C at the prompt abandons the current line.
        Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Line(OsString::new())),
        Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
        Err(err) => Err(ShellError::Editor(err)),
    }
}
