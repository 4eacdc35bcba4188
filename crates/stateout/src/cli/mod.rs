//! Command-line surface
//!
//! Flags use the single-dash long form (`-json`, `-state=path`). They are
//! rewritten to clap's double-dash form before parsing, so both spellings
//! work.

pub mod setup;

use clap::{Arg, ArgAction, Command};

pub const HELP: &str = "\
Usage: stateout [options] [NAME]

  Reads an output variable from a state file and prints the value.
  With no additional arguments, all outputs of the root module are
  printed.

Options:

  -state=path       Path to the state file to read. Defaults to
                    \"terraform.tfstate\" in the selected workspace.

  -no-color         If specified, output won't contain any color.

  -json             If specified, machine readable output will be
                    printed in JSON format.

  -raw              For value types that can be automatically
                    converted to a string, will print the raw
                    string directly, rather than a human-oriented
                    representation of the value.

  -compact-warnings If warnings are present, show only their
                    summaries.
";

pub fn build_cli() -> Command {
    Command::new("stateout")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Show output values from a persisted infrastructure state")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .override_help(HELP)
        .arg(
            Arg::new("name")
                .value_name("NAME")
                .action(ArgAction::Append)
                .num_args(0..),
        )
        .arg(
            Arg::new("state")
                .long("state")
                .value_name("path")
                .num_args(1),
        )
        .arg(flag("json"))
        .arg(flag("raw"))
        .arg(flag("no-color"))
        .arg(flag("compact-warnings"))
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .action(ArgAction::SetTrue),
        )
}

fn flag(name: &'static str) -> Arg {
    Arg::new(name).long(name).action(ArgAction::SetTrue)
}

/// Rewrite single-dash long flags (`-json`) to `--json`.
///
/// Short flags, lone `-`, and everything after `--` are left alone.
pub fn normalize_flags<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    let mut terminated = false;
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            if terminated {
                return arg.to_string();
            }
            if arg == "--" {
                terminated = true;
                return arg.to_string();
            }
            match arg.strip_prefix('-') {
                Some(rest) if rest.len() > 1 && !rest.starts_with('-') => format!("--{rest}"),
                _ => arg.to_string(),
            }
        })
        .collect()
}
