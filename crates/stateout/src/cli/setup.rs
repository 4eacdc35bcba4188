//! Process setup: logging and terminal detection

use std::io;

use anyhow::Result;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "STATEOUT_LOG";

/// Initialize tracing subscriber for logging
///
/// Configures the tracing subscriber with:
/// - Filter from `STATEOUT_LOG` (defaults to `warn`)
/// - Stderr output (to avoid mixing with stdout)
///
/// # Errors
/// Returns an error if the subscriber initialization fails
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

/// What the process knows about the terminal it writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalInfo {
    pub stdout_is_terminal: bool,
    pub stderr_is_terminal: bool,
    /// Width for the output channel, when stdout is a terminal
    pub stdout_columns: Option<usize>,
    /// Width for the warning and error channels, when stderr is a terminal
    pub stderr_columns: Option<usize>,
}

impl TerminalInfo {
    pub fn detect() -> Self {
        let stdout_is_terminal = io::stdout().is_terminal();
        let stderr_is_terminal = io::stderr().is_terminal();
        let width = crossterm::terminal::size()
            .ok()
            .map(|(columns, _)| usize::from(columns))
            .filter(|columns| *columns > 0);

        tracing::debug!(
            "Terminal: stdout tty={stdout_is_terminal}, stderr tty={stderr_is_terminal}, width={width:?}"
        );
        Self {
            stdout_is_terminal,
            stderr_is_terminal,
            stdout_columns: width.filter(|_| stdout_is_terminal),
            stderr_columns: width.filter(|_| stderr_is_terminal),
        }
    }
}
