use std::fmt::Display;
use std::io::Write;

use tracing::trace;

/// Tag written in front of every diagnostic line.
pub const PROGRAM_TAG: &str = "lsh";

/// Continuation signal returned by every command handler.
///
/// This is the only way a command tells the loop to stop. It is not an error
/// code: a failing command still returns [`Status::Continue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Read the next line.
    Continue,
    /// Leave the loop.
    Stop,
}

impl Status {
    /// Integer form of the signal: nonzero keeps looping, zero stops.
    pub fn code(self) -> i32 {
        match self {
            Status::Continue => 1,
            Status::Stop => 0,
        }
    }

    /// True unless the loop was asked to stop.
    pub fn should_continue(self) -> bool {
        self == Status::Continue
    }
}

/// Output streams handed to a command.
///
/// Built-ins write through these instead of touching the process streams, so
/// they can be exercised against in-memory buffers. Launched programs inherit
/// the real process streams regardless.
pub struct Io<'a> {
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

impl<'a> Io<'a> {
    pub fn new(stdout: &'a mut dyn Write, stderr: &'a mut dyn Write) -> Self {
        Self { stdout, stderr }
    }
}

/// Write one tagged diagnostic line to `stderr`.
///
/// There is nowhere left to report a failing stderr, so that case is only traced.
pub fn report(stderr: &mut dyn Write, message: impl Display) {
    if let Err(err) = writeln!(stderr, "{PROGRAM_TAG}: {message}") {
        trace!(error = %err, "stderr unavailable, diagnostic dropped");
    }
}
