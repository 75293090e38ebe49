//! Whitespace tokenization of a command line.
//!
//! A line is split on runs of [`DELIMITERS`] and empty fields are dropped.
//! Nothing else is interpreted: quotes, backslashes and `$` are ordinary
//! characters, so `echo "a b"` yields the three tokens `echo`, `"a` and `b"`.
//!
//! Lines are raw bytes, not necessarily UTF-8. Every delimiter is ASCII, so
//! splitting never cuts through a multi-byte character.

use crate::error::ShellError;
use std::ffi::OsStr;
use tracing::trace;

/// Bytes that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: &[u8] = b" \t\r\n\x07";

/// Number of token slots reserved up front, and added each time storage fills up.
pub const TOKEN_CHUNK: usize = 64;

/// Ordered tokens of one command line, borrowed from that line.
///
/// The first token is the command name and the rest are its arguments. A
/// blank line produces an empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens<'a> {
    items: Vec<&'a OsStr>,
}

impl<'a> Tokens<'a> {
    /// Token at `index`, or `None` once the end of the sequence is reached.
    pub fn get(&self, index: usize) -> Option<&'a OsStr> {
        self.items.get(index).copied()
    }

    /// The command name, if the line was not blank.
    pub fn command(&self) -> Option<&'a OsStr> {
        self.get(0)
    }

    /// Everything after the command name.
    pub fn args(&self) -> &[&'a OsStr] {
        self.items.get(1..).unwrap_or(&[])
    }

    /// All tokens, command name first.
    pub fn as_slice(&self) -> &[&'a OsStr] {
        &self.items
    }

    /// Number of tokens, command name included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True for a blank line.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a OsStr> + '_ {
        self.items.iter().copied()
    }

    /// Slots currently reserved for tokens.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }
}

/// Split `line` into tokens.
///
/// Storage grows in steps of [`TOKEN_CHUNK`]; already stored tokens keep
/// their order. Failing to grow is fatal and reported as
/// [`ShellError::Allocation`].
pub fn split_line<S: AsRef<OsStr> + ?Sized>(line: &S) -> Result<Tokens<'_>, ShellError> {
    let mut items: Vec<&OsStr> = Vec::new();
    items.try_reserve_exact(TOKEN_CHUNK)?;

    let bytes = line.as_ref().as_encoded_bytes();
    for field in bytes
        .split(|byte| DELIMITERS.contains(byte))
        .filter(|field| !field.is_empty())
    {
        if items.len() == items.capacity() {
            items.try_reserve_exact(TOKEN_CHUNK)?;
        }
        items.push(os_str(field));
    }

    trace!(tokens = items.len(), "line tokenized");
    Ok(Tokens { items })
}

#[cfg(unix)]
fn os_str(bytes: &[u8]) -> &OsStr {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(bytes)
}

#[cfg(not(unix))]
fn os_str(bytes: &[u8]) -> &OsStr {
    // SAFETY: `bytes` is a field of an `OsStr`'s encoded bytes split only on
    // ASCII delimiters, which keeps it a valid encoded sequence.
    unsafe { OsStr::from_encoded_bytes_unchecked(bytes) }
}
