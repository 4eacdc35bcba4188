//! Line-oriented output sinks

use std::io::{self, Stderr, Stdout, Write};

use strum::Display;

use crate::diagnostics::Severity;

/// Logical stream a message is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Channel {
    /// Informational output (stdout)
    Output,
    /// Warnings (stderr)
    Warn,
    /// Errors (stderr)
    Error,
}

impl From<Severity> for Channel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => Self::Error,
            Severity::Warning => Self::Warn,
            Severity::Informational => Self::Output,
        }
    }
}

/// A sink that accepts whole messages on three channels.
///
/// Each call writes one message followed by a newline.
pub trait Ui {
    fn output(&mut self, msg: &str);
    fn warn(&mut self, msg: &str);
    fn error(&mut self, msg: &str);

    fn write(&mut self, channel: Channel, msg: &str) {
        match channel {
            Channel::Output => self.output(msg),
            Channel::Warn => self.warn(msg),
            Channel::Error => self.error(msg),
        }
    }
}

impl<U: Ui + ?Sized> Ui for &mut U {
    fn output(&mut self, msg: &str) {
        (**self).output(msg);
    }

    fn warn(&mut self, msg: &str) {
        (**self).warn(msg);
    }

    fn error(&mut self, msg: &str) {
        (**self).error(msg);
    }
}

/// Writes output to one stream and warnings/errors to another.
#[derive(Debug)]
pub struct TerminalUi<O, E> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> TerminalUi<O, E> {
    pub const fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl TerminalUi<Stdout, Stderr> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

fn write_line(writer: &mut impl Write, channel: Channel, msg: &str) {
    if let Err(err) = writeln!(writer, "{msg}").and_then(|()| writer.flush()) {
        tracing::warn!("Failed to write to {channel} channel: {err}");
    }
}

impl<O: Write, E: Write> Ui for TerminalUi<O, E> {
    fn output(&mut self, msg: &str) {
        write_line(&mut self.out, Channel::Output, msg);
    }

    fn warn(&mut self, msg: &str) {
        write_line(&mut self.err, Channel::Warn, msg);
    }

    fn error(&mut self, msg: &str) {
        write_line(&mut self.err, Channel::Error, msg);
    }
}

/// Records every message with its channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferUi {
    entries: Vec<(Channel, String)>,
}

impl BufferUi {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[(Channel, String)] {
        &self.entries
    }

    /// Messages written to one channel, in order.
    pub fn messages(&self, channel: Channel) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, msg)| msg.as_str())
            .collect()
    }

    /// Everything written to one channel, newline-terminated like a terminal.
    pub fn contents(&self, channel: Channel) -> String {
        self.messages(channel)
            .into_iter()
            .map(|msg| format!("{msg}\n"))
            .collect()
    }
}

impl Ui for BufferUi {
    fn output(&mut self, msg: &str) {
        self.entries.push((Channel::Output, msg.to_string()));
    }

    fn warn(&mut self, msg: &str) {
        self.entries.push((Channel::Warn, msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.entries.push((Channel::Error, msg.to_string()));
    }
}
