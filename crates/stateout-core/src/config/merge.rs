//! Configuration merging (immutable pattern)
//!
//! Each layer returns a new [`Config`]; values present in the higher layer win.

use super::types::{Config, ConfigFile};

impl Config {
    /// Overlay a config file onto this config.
    #[must_use]
    pub fn merge(self, file: ConfigFile) -> Self {
        Self {
            color: file.color.unwrap_or(self.color),
            compact_warnings: file.compact_warnings.unwrap_or(self.compact_warnings),
            columns: file.columns.or(self.columns),
            state_path: file.state.or(self.state_path),
        }
    }
}
