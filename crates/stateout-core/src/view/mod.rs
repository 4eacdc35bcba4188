//! The reporting view: owns the sink and decides how diagnostics are shown
//!
//! # Diagnostics pipeline
//!
//! 1. Sort by severity, subject and summary
//! 2. Fold repeated warnings into their first occurrence
//! 3. With compact warnings on and nothing but warnings left, print one
//!    summary on the warning channel and stop
//! 4. Otherwise render each diagnostic and send it to the channel matching
//!    its severity

mod config;
mod ui;


pub use config::{RenderConfig, DEFAULT_COLUMNS};
pub use ui::{BufferUi, Channel, TerminalUi, Ui};

use crate::diagnostics::{self, Diagnostics};

/// Warnings sharing a summary are folded once more than this many appear.
pub const CONSOLIDATION_THRESHOLD: usize = 1;

/// Hint appended to the compact warning summary.
pub const COMPACT_WARNINGS_HINT: &str =
    "To see the full warning notes, run without -compact-warnings.";

/// Output sink plus the settings used to render onto it.
#[derive(Debug)]
pub struct View<U: Ui> {
    ui: U,
    config: RenderConfig,
}

impl<U: Ui> View<U> {
    pub const fn new(ui: U, config: RenderConfig) -> Self {
        Self { ui, config }
    }

    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub const fn ui(&self) -> &U {
        &self.ui
    }

    pub fn into_ui(self) -> U {
        self.ui
    }

    /// Write successful command output.
    pub fn output(&mut self, msg: &str) {
        self.ui.output(msg);
    }

    /// Report a set of diagnostics. Writes nothing when the set is empty.
    pub fn diagnostics(&mut self, diags: Diagnostics) {
        if diags.is_empty() {
            return;
        }

        let diags = diags
            .sorted()
            .consolidate_warnings(CONSOLIDATION_THRESHOLD);

        // Full warnings stay when errors are present: they often explain the error.
        if self.config.compact_warnings() && diags.all_warnings() {
            let color = self.config.color_for(Channel::Warn);
            let summary = diagnostics::warnings_compact(&diags, color);
            self.ui
                .warn(&format!("\n{summary}\n{COMPACT_WARNINGS_HINT}\n"));
            return;
        }

        for diag in &diags {
            let channel = Channel::from(diag.severity());
            let width = self.config.columns_for(channel);
            let msg = if self.config.color_for(channel) {
                diagnostics::diagnostic(diag, self.config.sources(), width)
            } else {
                diagnostics::diagnostic_plain(diag, self.config.sources(), width)
            };
            self.ui.write(channel, &msg);
        }
    }
}
