//! Configuration structure definitions

use std::path::PathBuf;

use serde::Deserialize;
use strum::{Display, EnumString};

/// When to emit ANSI color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color a stream when it is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Whether to color a stream, given whether it is a terminal.
    #[must_use]
    pub const fn resolve(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub color: ColorChoice,
    pub compact_warnings: bool,
    /// Wrap width override; `None` means the terminal width
    pub columns: Option<usize>,
    /// State file override; `None` means the workspace default
    pub state_path: Option<PathBuf>,
}

/// One configuration file. Absent keys leave the lower layer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub color: Option<ColorChoice>,
    pub compact_warnings: Option<bool>,
    pub columns: Option<usize>,
    pub state: Option<PathBuf>,
}
