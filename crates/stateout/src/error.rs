//! Usage errors
//!
//! These are rejected before any state is read and are printed with the
//! command help. They never enter the diagnostics pipeline.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Error parsing command-line flags: {0}")]
    Flags(String),

    #[error(
        "The output command expects exactly one argument with the name\n\
         of an output value or no arguments to show all outputs."
    )]
    TooManyArguments,

    #[error("The -raw and -json options are mutually-exclusive.")]
    RawAndJson,

    #[error("You must give the name of a single output value when using the -raw option.")]
    RawWithoutName,
}

impl From<clap::Error> for UsageError {
    fn from(err: clap::Error) -> Self {
        let rendered = err.to_string();
        let first = rendered.lines().next().unwrap_or_default();
        Self::Flags(first.trim_start_matches("error: ").to_string())
    }
}
