//! Render settings fixed for the lifetime of a command

use super::Channel;
use crate::diagnostics::SourceLookup;

/// Column budget used when the terminal width is unknown.
pub const DEFAULT_COLUMNS: usize = 78;

/// How diagnostics and output are presented.
#[derive(Debug)]
pub struct RenderConfig {
    output_color: bool,
    error_color: bool,
    compact_warnings: bool,
    output_columns: usize,
    error_columns: usize,
    sources: SourceLookup,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderConfig {
    /// Plain text, full warnings, default widths, no source snippets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output_color: false,
            error_color: false,
            compact_warnings: false,
            output_columns: DEFAULT_COLUMNS,
            error_columns: DEFAULT_COLUMNS,
            sources: SourceLookup::none(),
        }
    }

    /// Color every channel, or none.
    #[must_use]
    pub fn with_color(self, color: bool) -> Self {
        self.with_channel_colors(color, color)
    }

    /// Color stdout and stderr independently, since either may be redirected.
    #[must_use]
    pub fn with_channel_colors(self, output_color: bool, error_color: bool) -> Self {
        Self {
            output_color,
            error_color,
            ..self
        }
    }

    #[must_use]
    pub fn with_compact_warnings(self, compact_warnings: bool) -> Self {
        Self {
            compact_warnings,
            ..self
        }
    }

    #[must_use]
    pub fn with_columns(self, output_columns: usize, error_columns: usize) -> Self {
        Self {
            output_columns,
            error_columns,
            ..self
        }
    }

    #[must_use]
    pub fn with_sources(self, sources: SourceLookup) -> Self {
        Self { sources, ..self }
    }

    /// Whether anything is colored at all.
    pub const fn color(&self) -> bool {
        self.output_color || self.error_color
    }

    /// Whether messages on `channel` are colored.
    pub const fn color_for(&self, channel: Channel) -> bool {
        match channel {
            Channel::Output => self.output_color,
            Channel::Warn | Channel::Error => self.error_color,
        }
    }

    pub const fn compact_warnings(&self) -> bool {
        self.compact_warnings
    }

    pub const fn output_columns(&self) -> usize {
        self.output_columns
    }

    pub const fn error_columns(&self) -> usize {
        self.error_columns
    }

    pub const fn sources(&self) -> &SourceLookup {
        &self.sources
    }

    /// Width of the stream a channel writes to.
    pub const fn columns_for(&self, channel: Channel) -> usize {
        match channel {
            Channel::Output => self.output_columns,
            Channel::Warn | Channel::Error => self.error_columns,
        }
    }
}
