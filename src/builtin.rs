//! Commands implemented inside the shell process.
//!
//! The registry is a fixed, ordered table built at compile time. A name that
//! matches an entry is always handled here; the launcher is never consulted for it.

use crate::command::{Io, Status};
use crate::tokenizer::Tokens;
use anyhow::{Context, Result};
use std::env;
use std::ffi::OsStr;
use std::io::Write;

/// A command run in-process by the shell.
pub trait BuiltinCommand {
    /// Exact, case-sensitive name the command is invoked by.
    fn name(&self) -> &'static str;

    /// Run the command with the full token sequence (the name is token 0).
    ///
    /// An `Err` is a recoverable failure of this command only: the caller
    /// reports it and keeps looping.
    fn invoke(&self, tokens: &Tokens<'_>, io: &mut Io<'_>) -> Result<Status>;
}

/// Built-ins in lookup priority order.
pub const BUILTINS: &[&dyn BuiltinCommand] = &[&Cd, &Help, &Exit];

/// Find the built-in registered under `name`.
///
/// Names are compared byte for byte, so a token that is not valid UTF-8
/// never matches.
pub fn lookup<S: AsRef<OsStr> + ?Sized>(name: &S) -> Option<&'static dyn BuiltinCommand> {
    let name = name.as_ref();
    BUILTINS.iter().copied().find(|builtin| name == builtin.name())
}

/// Names of all built-ins, in registry order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|builtin| builtin.name())
}

/// Change the working directory of the shell, and so of every program it launches later.
pub struct Cd;

impl BuiltinCommand for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn invoke(&self, tokens: &Tokens<'_>, _io: &mut Io<'_>) -> Result<Status> {
        let target = tokens
            .get(1)
            .ok_or_else(|| anyhow::anyhow!("expected argument to \"cd\""))?;

        env::set_current_dir(target)
            .with_context(|| format!("cd: {}", target.to_string_lossy()))?;
        Ok(Status::Continue)
    }
}

/// Print a usage banner and the built-in names. Arguments are ignored.
pub struct Help;

impl BuiltinCommand for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn invoke(&self, _tokens: &Tokens<'_>, io: &mut Io<'_>) -> Result<Status> {
        let out = &mut *io.stdout;
        writeln!(out, "lsh: a minimal command interpreter")?;
        writeln!(out, "Type program names and arguments, and hit enter.")?;
        writeln!(out, "The following are built in:")?;
        for name in names() {
            writeln!(out, "  {name}")?;
        }
        writeln!(out, "Use the man command for information on other programs.")?;
        out.flush()?;
        Ok(Status::Continue)
    }
}

/// Leave the command loop. Arguments are ignored.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn invoke(&self, _tokens: &Tokens<'_>, _io: &mut Io<'_>) -> Result<Status> {
        Ok(Status::Stop)
    }
}
