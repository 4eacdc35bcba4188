//! Stateout CLI - show output values from a persisted infrastructure state
//!
//! Binary name: `stateout`

use std::process;

use anyhow::{Context, Result};
use stateout::{
    cli::setup::{init_tracing, TerminalInfo},
    commands::OutputCommand,
};
use stateout_core::{
    config::load_config,
    state::{EnvWorkspaceResolver, LocalBackendLoader},
    TerminalUi,
};

fn run() -> Result<i32> {
    init_tracing()?;

    let config = load_config().context("Failed to load configuration")?;
    let root = std::env::current_dir().context("Failed to determine the working directory")?;
    let loader = LocalBackendLoader::new(&root);
    let workspaces = EnvWorkspaceResolver::new(&root);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let code = OutputCommand::new(TerminalUi::stdio(), config, &loader, &workspaces)
        .with_terminal(TerminalInfo::detect())
        .run(&args);
    Ok(code)
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {err:#}");
            }
            1
        }
    };

    #[allow(clippy::exit)]
    process::exit(code);
}
