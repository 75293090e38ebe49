use std::collections::TryReserveError;

use rustyline::error::ReadlineError;
use thiserror::Error;

/// Errors that end the shell process.
///
/// Failures of individual commands (a bad `cd` target, a missing program) are
/// never represented here: they are reported on stderr and the loop carries on.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The input stream could not be read.
    #[error("readline: {0}")]
    Read(#[source] std::io::Error),

    /// The line editor failed for a reason other than end of input.
    #[error("readline: {0}")]
    Editor(#[source] ReadlineError),

    /// Token storage could not be grown.
    #[error("allocation error")]
    Allocation(#[from] TryReserveError),
}
