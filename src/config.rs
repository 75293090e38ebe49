//! Start-up configuration.
//!
//! Values come from the command line first, then from `LSH_*` environment
//! variables, then from built-in defaults. No configuration file is read.

use crate::interpreter::DEFAULT_PROMPT;
use argh::FromArgs;

/// Environment variable consulted for the prompt when `--prompt` is absent.
pub const PROMPT_VAR: &str = "LSH_PROMPT";
/// Environment variable consulted for log filter directives when `--log-filter` is absent.
pub const LOG_FILTER_VAR: &str = "LSH_LOG";
/// Log filter used when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(FromArgs, Debug, Default, PartialEq)]
/// A minimal interactive command interpreter.
pub struct Args {
    #[argh(option)]
    /// prompt printed before each line is read
    pub prompt: Option<String>,

    #[argh(switch)]
    /// read standard input as a plain stream, without line editing
    pub plain: bool,

    #[argh(option)]
    /// tracing filter directives, e.g. "lsh=debug"
    pub log_filter: Option<String>,
}

/// Resolved settings for one shell session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub plain: bool,
    pub log_filter: String,
}

impl Config {
    /// Merge `args` with environment values obtained through `lookup`.
    pub fn resolve(args: Args, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let prompt = args
            .prompt
            .or_else(|| lookup(PROMPT_VAR))
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string());
        let log_filter = args
            .log_filter
            .or_else(|| lookup(LOG_FILTER_VAR))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            prompt,
            plain: args.plain,
            log_filter,
        }
    }

    /// Merge `args` with the process environment.
    pub fn from_env(args: Args) -> Self {
        Self::resolve(args, |key| std::env::var(key).ok())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(Args::default(), |_| None)
    }
}
