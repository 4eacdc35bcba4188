//! Diagnostics collected while running a command
//!
//! A [`Diagnostic`] is created once and never changed. Stages return their own
//! [`Diagnostics`] value and the caller combines them with
//! [`Diagnostics::append`], so there is no shared accumulator.

mod format;
mod source;


use std::{collections::HashMap, fmt};

use serde::Serialize;
use strum::{Display, EnumString};

pub use format::{diagnostic, diagnostic_plain, warnings_compact};
pub use source::SourceLookup;

/// How serious a diagnostic is.
///
/// Declaration order is sort order: errors first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks success; forces exit code 1
    Error,
    /// Worth reading, never blocks success
    Warning,
    /// Plain notice for the user
    #[strum(serialize = "info")]
    #[serde(rename = "info")]
    Informational,
}

/// A position in a source file. Lines and columns are 1-based, bytes 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
    pub byte: usize,
}

impl SourcePos {
    #[must_use]
    pub const fn new(line: usize, column: usize, byte: usize) -> Self {
        Self { line, column, byte }
    }
}

/// A span of a source file that a diagnostic refers to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourceRange {
    pub filename: String,
    pub start: SourcePos,
    pub end: SourcePos,
}

impl SourceRange {
    #[must_use]
    pub fn new(filename: impl Into<String>, start: SourcePos, end: SourcePos) -> Self {
        Self {
            filename: filename.into(),
            start,
            end,
        }
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} line {}", self.filename, self.start.line)
    }
}

/// A single reportable condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    summary: String,
    detail: Option<String>,
    subject: Option<SourceRange>,
    similar: usize,
}

impl Diagnostic {
    #[must_use]
    pub fn new(severity: Severity, summary: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: None,
            subject: None,
            similar: 0,
        }
    }

    #[must_use]
    pub fn error(summary: impl Into<String>) -> Self {
        Self::new(Severity::Error, summary)
    }

    #[must_use]
    pub fn warning(summary: impl Into<String>) -> Self {
        Self::new(Severity::Warning, summary)
    }

    #[must_use]
    pub fn info(summary: impl Into<String>) -> Self {
        Self::new(Severity::Informational, summary)
    }

    #[must_use]
    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_subject(self, subject: SourceRange) -> Self {
        Self {
            subject: Some(subject),
            ..self
        }
    }

    pub const fn severity(&self) -> Severity {
        self.severity
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub const fn subject(&self) -> Option<&SourceRange> {
        self.subject.as_ref()
    }

    /// Number of similar warnings folded into this one by consolidation.
    pub const fn similar(&self) -> usize {
        self.similar
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    fn sort_key(&self) -> (Severity, Option<&SourceRange>, &str) {
        (self.severity, self.subject.as_ref(), &self.summary)
    }
}

/// Ordered sequence of diagnostics for one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Return a new sequence with `diag` added at the end.
    #[must_use]
    pub fn with(mut self, diag: Diagnostic) -> Self {
        self.0.push(diag);
        self
    }

    /// Return a new sequence with all of `other` after `self`.
    #[must_use]
    pub fn append(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    /// True when non-empty and every entry is a warning.
    pub fn all_warnings(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .iter()
                .all(|diag| diag.severity == Severity::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Sort by severity, then subject (sourceless first), then summary.
    ///
    /// The sort is stable, so identical keys keep their insertion order.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.0.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        self
    }

    /// Fold warnings that share a summary.
    ///
    /// The first `threshold - 1` occurrences of a summary pass through
    /// untouched; the next one absorbs every later occurrence and records how
    /// many it absorbed. Errors and informational diagnostics pass through.
    #[must_use]
    pub fn consolidate_warnings(self, threshold: usize) -> Self {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut groups: HashMap<String, usize> = HashMap::new();
        let mut consolidated: Vec<Diagnostic> = Vec::with_capacity(self.0.len());

        for diag in self.0 {
            if diag.severity != Severity::Warning {
                consolidated.push(diag);
                continue;
            }

            if let Some(&index) = groups.get(&diag.summary) {
                consolidated[index].similar += 1 + diag.similar;
                continue;
            }

            let count = seen.entry(diag.summary.clone()).or_insert(0);
            *count += 1;
            if *count >= threshold {
                groups.insert(diag.summary.clone(), consolidated.len());
            }
            consolidated.push(diag);
        }

        Self(consolidated)
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diag: Diagnostic) -> Self {
        Self(vec![diag])
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
