use crate::builtin;
use crate::command::{Io, Status, report};
use crate::error::ShellError;
use crate::launcher;
use crate::reader::{LineReader, ReadOutcome};
use crate::tokenizer::{self, Tokens};
use std::ffi::OsStr;
use tracing::debug;

const DISPATCH_TARGET: &str = "lsh::dispatch";

/// Default prompt shown before each read.
pub const DEFAULT_PROMPT: &str = "> ";

/// Why the command loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A command returned [`Status::Stop`].
    Exit,
    /// The reader ran out of input.
    EndOfInput,
}

/// Read, tokenize and dispatch command lines until told to stop.
///
/// Built-ins always come from the fixed [`builtin::BUILTINS`] table, so the
/// names `help` lists are exactly the names dispatch will run in-process.
///
/// Example
/// ```
/// use lsh::{Interpreter, Io, StreamReader, Termination};
///
/// let sh = Interpreter::default();
/// let mut reader = StreamReader::new("help\nexit\n".as_bytes(), Vec::new());
/// let (mut out, mut err) = (Vec::new(), Vec::new());
///
/// let end = sh.run(&mut reader, &mut Io::new(&mut out, &mut err)).unwrap();
/// assert_eq!(end, Termination::Exit);
/// assert!(String::from_utf8(out).unwrap().contains("  exit\n"));
/// ```
pub struct Interpreter {
    prompt: String,
}

impl Interpreter {
    /// Create an interpreter that shows `prompt` before each read.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// The prompt written before each read.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Decide between a built-in and an external program, and run it.
    ///
    /// An empty sequence does nothing. A built-in failure is reported as one
    /// line on `io.stderr` and does not stop the loop.
    pub fn dispatch(&self, tokens: &Tokens<'_>, io: &mut Io<'_>) -> Status {
        let Some(name) = tokens.command() else {
            return Status::Continue;
        };

        match builtin::lookup(name) {
            Some(builtin) => {
                debug!(target: DISPATCH_TARGET, builtin = builtin.name(), "running built-in");
                builtin.invoke(tokens, io).unwrap_or_else(|err| {
                    report(io.stderr, format_args!("{err:#}"));
                    Status::Continue
                })
            }
            None => {
                debug!(target: DISPATCH_TARGET, program = ?name, "running external program");
                launcher::launch(tokens, io)
            }
        }
    }

    /// Tokenize and dispatch a single line.
    pub fn run_line<S: AsRef<OsStr> + ?Sized>(
        &self,
        line: &S,
        io: &mut Io<'_>,
    ) -> Result<Status, ShellError> {
        let tokens = tokenizer::split_line(line)?;
        Ok(self.dispatch(&tokens, io))
    }

    /// Drive the loop over `reader` until a command stops it or input ends.
    ///
    /// Only fatal errors (unreadable input, failed token allocation) are returned as `Err`.
    pub fn run(
        &self,
        reader: &mut dyn LineReader,
        io: &mut Io<'_>,
    ) -> Result<Termination, ShellError> {
        loop {
            let line = match reader.read_line(&self.prompt)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Eof => {
                    debug!(target: DISPATCH_TARGET, "end of input");
                    return Ok(Termination::EndOfInput);
                }
            };

            if !self.run_line(&line, io)?.should_continue() {
                debug!(target: DISPATCH_TARGET, "loop stopped by command");
                return Ok(Termination::Exit);
            }
        }
    }
}

impl Default for Interpreter {
    /// The `"> "` prompt.
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::StreamReader;
    use rstest::rstest;
    use std::collections::VecDeque;

    struct Script(VecDeque<&'static str>);

    impl LineReader for Script {
        fn read_line(&mut self, _prompt: &str) -> Result<ReadOutcome, ShellError> {
            Ok(match self.0.pop_front() {
                Some(line) => ReadOutcome::Line(line.into()),
                None => ReadOutcome::Eof,
            })
        }
    }

    struct FailingReader;

    impl LineReader for FailingReader {
        fn read_line(&mut self, _prompt: &str) -> Result<ReadOutcome, ShellError> {
            Err(ShellError::Read(std::io::Error::other("boom")))
        }
    }

    fn run_script(lines: &[&'static str]) -> (Result<Termination, ShellError>, String, String) {
        let sh = Interpreter::default();
        let mut reader = Script(lines.iter().copied().collect());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = sh.run(&mut reader, &mut Io::new(&mut out, &mut err));
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[rstest]
    #[case("")]
    #[case("    ")]
    #[case("\t \r\n")]
    fn blank_lines_continue_silently(#[case] line: &str) {
        let sh = Interpreter::default();
        let mut out = Vec::new();
        let mut err = Vec::new();

        let status = sh.run_line(line, &mut Io::new(&mut out, &mut err)).unwrap();

        assert_eq!(status, Status::Continue);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn exit_ends_the_loop_after_earlier_commands() {
        let (result, out, err) = run_script(&["help", "", "cd", "exit now", "help"]);

        assert_eq!(result.unwrap(), Termination::Exit);
        // The trailing `help` must not run.
        assert_eq!(out.matches("The following are built in:").count(), 1);
        assert_eq!(err, "lsh: expected argument to \"cd\"\n");
    }

    #[test]
    fn end_of_input_ends_the_loop() {
        let (result, out, err) = run_script(&["", "  "]);
        assert_eq!(result.unwrap(), Termination::EndOfInput);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn missing_program_does_not_stop_the_loop() {
        let (result, _, err) = run_script(&["thisprogramdoesnotexist123", "help"]);

        assert_eq!(result.unwrap(), Termination::EndOfInput);
        assert_eq!(err.lines().count(), 1);
        assert!(err.starts_with("lsh: thisprogramdoesnotexist123: "));
    }

    #[test]
    fn read_failure_is_fatal() {
        let sh = Interpreter::default();
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = sh.run(&mut FailingReader, &mut Io::new(&mut out, &mut err));

        assert_eq!(result.unwrap_err().to_string(), "readline: boom");
    }

    #[test]
    fn help_lists_exactly_what_dispatch_runs_in_process() {
        let sh = Interpreter::default();
        let mut out = Vec::new();
        let mut err = Vec::new();

        let status = sh.run_line("help", &mut Io::new(&mut out, &mut err)).unwrap();

        assert_eq!(status, Status::Continue);
        let out = String::from_utf8(out).unwrap();
        let listed: Vec<&str> = out
            .lines()
            .filter_map(|line| line.strip_prefix("  "))
            .collect();
        assert_eq!(listed, builtin::names().collect::<Vec<_>>());
        for name in listed {
            assert!(builtin::lookup(name).is_some(), "{name} is listed but not dispatchable");
        }
    }

    #[test]
    fn exit_line_signals_stop() {
        let sh = Interpreter::new("$ ");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut io = Io::new(&mut out, &mut err);

        assert_eq!(sh.run_line("exit", &mut io).unwrap(), Status::Stop);
        assert_eq!(sh.run_line("  exit  1 ", &mut io).unwrap(), Status::Stop);
        assert_eq!(sh.prompt(), "$ ");
    }

    #[test]
    fn non_utf8_line_does_not_end_the_loop() {
        let sh = Interpreter::default();
        let input: &[u8] = b"thisprogramdoesnotexist\xe9\nhelp\nexit\n";
        let mut reader = StreamReader::new(input, Vec::new());
        let mut out = Vec::new();
        let mut err = Vec::new();

        let end = sh.run(&mut reader, &mut Io::new(&mut out, &mut err)).unwrap();

        assert_eq!(end, Termination::Exit);
        assert!(String::from_utf8(out).unwrap().contains("  help\n"));
        assert_eq!(err.split(|b| *b == b'\n').filter(|l| !l.is_empty()).count(), 1);
        assert!(err.starts_with(b"lsh: thisprogramdoesnotexist"));
    }

    #[test]
    fn prompt_is_written_before_each_read() {
        let sh = Interpreter::new("lsh> ");
        let mut reader = StreamReader::new("\n\nexit\n".as_bytes(), Vec::new());
        let mut out = Vec::new();
        let mut err = Vec::new();

        let end = sh.run(&mut reader, &mut Io::new(&mut out, &mut err)).unwrap();

        assert_eq!(end, Termination::Exit);
        let (_, prompts) = reader.into_inner();
        assert_eq!(String::from_utf8(prompts).unwrap(), "lsh> lsh> lsh> ");
    }
}
