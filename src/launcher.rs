//! Running external programs.

use crate::command::{Io, Status, report};
use crate::tokenizer::Tokens;
use std::process::{Command, ExitStatus};
use tracing::debug;

const LAUNCH_TARGET: &str = "lsh::launcher";

/// Run the program named by the first token and wait for it to terminate.
///
/// The child gets the whole token sequence as its argument vector, and
/// inherits stdio, environment and working directory from the shell. The
/// program is resolved through `PATH` by the standard library. Failing to
/// start or wait on the child is reported on `io.stderr`; either way the
/// result is [`Status::Continue`].
pub fn launch(tokens: &Tokens<'_>, io: &mut Io<'_>) -> Status {
    let Some(program) = tokens.command() else {
        return Status::Continue;
    };

    // The child writes straight to the inherited descriptor, so anything we
    // buffered has to go out first.
    if let Err(err) = io.stdout.flush() {
        debug!(target: LAUNCH_TARGET, error = %err, "flushing stdout before spawn failed");
    }

    debug!(
        target: LAUNCH_TARGET,
        ?program,
        argc = tokens.len(),
        "spawning external program"
    );

    let mut child = match Command::new(program).args(tokens.args()).spawn() {
        Ok(child) => child,
        Err(err) => {
            report(io.stderr, format_args!("{}: {err}", program.to_string_lossy()));
            return Status::Continue;
        }
    };

    // `wait` does not ask for stop notifications, so it only returns once the
    // child has exited or been killed.
    match child.wait() {
        Ok(status) => debug!(
            target: LAUNCH_TARGET,
            ?program,
            pid = child.id(),
            code = exit_code(status),
            "external program finished"
        ),
        Err(err) => report(
            io.stderr,
            format_args!("{}: {err}", program.to_string_lossy()),
        ),
    }

    Status::Continue
}

/// Shell-style exit code of a finished child: its own code, or `128 + signal`.
pub fn exit_code(status: ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = exit_status.signal() {
        128 + signal
    } else if exit_status.core_dumped() {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}
