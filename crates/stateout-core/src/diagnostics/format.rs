//! Turning diagnostics into human-readable text
//!
//! Pure functions: no I/O apart from the source lookup, which the caller owns.

use std::fmt::Write as _;

use colored::{ColoredString, Colorize};

use super::{Diagnostic, Diagnostics, Severity, SourceLookup, SourceRange};

/// Longest run of source lines quoted under a diagnostic.
const MAX_SNIPPET_LINES: usize = 5;

/// Render a diagnostic without any markup.
///
/// ```text
///
/// Error: Failed to refresh state
///
///   on terraform.tfstate line 3:
///    3:   "outputs": {
///
/// expected `,` or `}` at line 3 column 15
/// ```
pub fn diagnostic_plain(diag: &Diagnostic, sources: &SourceLookup, width: usize) -> String {
    let mut buf = String::from("\n");
    buf.push_str(label(diag.severity()));
    buf.push_str(diag.summary());
    buf.push('\n');

    for line in body(diag, sources, width, false) {
        buf.push_str(&line);
        buf.push('\n');
    }

    buf
}

/// Render a diagnostic with color and a left-hand rule.
///
/// The rule takes two columns, so wrapping uses `width - 2`.
pub fn diagnostic(diag: &Diagnostic, sources: &SourceLookup, width: usize) -> String {
    let severity = diag.severity();
    let mut buf = String::new();

    let _ = writeln!(buf, "{}", rule(severity, "╷"));
    let _ = writeln!(
        buf,
        "{} {}{}",
        rule(severity, "│"),
        colored_label(severity),
        diag.summary().bold()
    );
    for line in body(diag, sources, width.saturating_sub(2), true) {
        let _ = writeln!(buf, "{} {line}", rule(severity, "│"));
    }
    let _ = writeln!(buf, "{}", rule(severity, "╵"));

    buf
}

/// Summarise a set of warnings one line each.
///
/// Used when the user asked for compact warnings and nothing worse happened.
pub fn warnings_compact(diags: &Diagnostics, color: bool) -> String {
    let mut buf = String::new();

    if color {
        let _ = write!(buf, "{}", "Warnings:".yellow().bold());
    } else {
        buf.push_str("Warnings:");
    }
    buf.push_str("\n\n");

    for diag in diags {
        let _ = writeln!(buf, "- {}", diag.summary());
        let _ = match (diag.subject(), diag.similar()) {
            (Some(subject), 0) => writeln!(buf, "  on {subject}"),
            (Some(subject), more) => writeln!(buf, "  on {subject} (and {more} more)"),
            (None, 0) => Ok(()),
            (None, more) => writeln!(buf, "  ({} occurrences of this warning)", more + 1),
        };
    }

    buf
}

const fn label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "Error: ",
        Severity::Warning => "Warning: ",
        Severity::Informational => "",
    }
}

fn colored_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => label(severity).red().bold(),
        Severity::Warning => label(severity).yellow().bold(),
        Severity::Informational => label(severity).normal(),
    }
}

fn rule(severity: Severity, glyph: &str) -> ColoredString {
    match severity {
        Severity::Error => glyph.red(),
        Severity::Warning => glyph.yellow(),
        Severity::Informational => glyph.normal(),
    }
}

/// Everything below the summary line: snippet, then detail.
fn body(diag: &Diagnostic, sources: &SourceLookup, width: usize, color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(subject) = diag.subject() {
        lines.push(String::new());
        lines.extend(snippet(subject, sources, color));
    }

    let detail = detail_lines(diag, width);
    if !detail.is_empty() {
        lines.push(String::new());
        lines.extend(detail);
    }

    lines
}

fn snippet(subject: &SourceRange, sources: &SourceLookup, color: bool) -> Vec<String> {
    let mut lines = vec![format!("  on {subject}:")];

    let Some(source) = sources.source(&subject.filename) else {
        return lines;
    };
    let text = String::from_utf8_lossy(&source);

    let first = subject.start.line.max(1);
    let last = subject
        .end
        .line
        .max(first)
        .min(first + MAX_SNIPPET_LINES - 1);
    let single_line = subject.start.line == subject.end.line;

    for (index, line) in text
        .lines()
        .enumerate()
        .skip(first - 1)
        .take(last - first + 1)
    {
        let shown = if color && single_line {
            highlight(line, subject.start.column, subject.end.column)
        } else {
            line.to_string()
        };
        lines.push(format!("{:>4}: {shown}", index + 1));
    }

    lines
}

/// Underline the 1-based column span `[start, end)`, at least one character wide.
fn highlight(line: &str, start: usize, end: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    let from = start.saturating_sub(1).min(chars.len());
    let to = end.saturating_sub(1).max(from + 1).min(chars.len());
    if from >= to {
        return line.to_string();
    }

    let before: String = chars[..from].iter().collect();
    let marked: String = chars[from..to].iter().collect();
    let after: String = chars[to..].iter().collect();
    format!("{before}{}{after}", marked.underline())
}

fn detail_lines(diag: &Diagnostic, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    if let Some(detail) = diag.detail() {
        for line in detail.lines() {
            // Indented lines are preformatted; leave them alone.
            if width <= 1 || line.is_empty() || line.starts_with(char::is_whitespace) {
                lines.push(line.to_string());
            } else {
                lines.extend(
                    textwrap::wrap(line, width)
                        .into_iter()
                        .map(std::borrow::Cow::into_owned),
                );
            }
        }
    }

    if diag.similar() > 0 {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(similar_note(diag.similar()));
    }

    lines
}

fn similar_note(similar: usize) -> String {
    if similar == 1 {
        "(and one more similar warning elsewhere)".to_string()
    } else {
        format!("(and {similar} more similar warnings elsewhere)")
    }
}
