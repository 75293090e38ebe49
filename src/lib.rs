//! A minimal interactive command interpreter.
//!
//! The shell reads one line at a time, splits it on whitespace into a program
//! name and arguments, and either runs one of a few built-in commands in-process
//! or launches an external program and waits for it. There is no quoting,
//! no pipelines, no redirection and no job control.
//!
//! The main entry point is [`Interpreter`], which drives the read, tokenize and
//! dispatch cycle over any [`LineReader`]. The [`tokenizer`] and [`builtin`]
//! modules are public so the pieces can be used on their own.

pub mod builtin;
pub mod command;
pub mod config;
mod error;
mod interpreter;
pub mod launcher;
pub mod logging;
pub mod reader;
pub mod tokenizer;

pub use command::{Io, PROGRAM_TAG, Status};
pub use error::ShellError;
pub use interpreter::{Interpreter, Termination};
pub use reader::{EditorReader, LineReader, ReadOutcome, StreamReader};
