//! Output formats for the output command.
//!
//! The format is picked once from mutually exclusive flags. Every variant
//! honours the same contract: render the whole [`OutputSet`] or one named
//! value through the view, and report problems as diagnostics.
//!
//! | format | all outputs                          | one output            |
//! |--------|--------------------------------------|-----------------------|
//! | Text   | `name = value` per output            | the value             |
//! | Json   | `{"name": {sensitive, type, value}}` | the bare JSON value   |
//! | Raw    | not allowed                          | the bare scalar       |

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use strum::Display;

use crate::{
    diagnostics::{Diagnostic, Diagnostics},
    values::{format_value, OutputSet, OutputValue, SENSITIVE_PLACEHOLDER},
    view::{Ui, View},
};

/// How output values are presented.
///
/// # Examples
///
/// ```
/// use stateout_core::OutputFormat;
///
/// assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
/// assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Text);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Human-oriented, sensitive values masked
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
    /// A single scalar, unquoted, for shell scripts
    Raw,
}

/// One entry of the all-outputs JSON document.
#[derive(Serialize)]
struct JsonOutput<'a> {
    sensitive: bool,
    #[serde(rename = "type")]
    ty: &'a Value,
    value: &'a Value,
}

impl OutputFormat {
    /// Pick a format from the `-json` / `-raw` flags.
    ///
    /// The flags are mutually exclusive; that is checked before this is called.
    #[must_use]
    pub const fn from_flags(json: bool, raw: bool) -> Self {
        if json {
            Self::Json
        } else if raw {
            Self::Raw
        } else {
            Self::Text
        }
    }

    /// Render `outputs`, or only `name` when given, onto the view.
    pub fn render<U: Ui>(
        self,
        view: &mut View<U>,
        name: Option<&str>,
        outputs: &OutputSet,
    ) -> Diagnostics {
        let selected = match name {
            Some(name) => match outputs.get(name) {
                Some(value) => Some(value),
                None => return Diagnostics::from(not_found(name)),
            },
            None => None,
        };

        match (self, selected) {
            (Self::Text, Some(value)) => {
                view.output(&text_value(value));
                Diagnostics::new()
            }
            (Self::Text, None) => render_text_all(view, outputs),
            (Self::Json, Some(value)) => render_json(view, value.value()),
            (Self::Json, None) => {
                let document: BTreeMap<&str, JsonOutput<'_>> = outputs
                    .iter()
                    .map(|value| {
                        (
                            value.name(),
                            JsonOutput {
                                sensitive: value.is_sensitive(),
                                ty: value.ty(),
                                value: value.value(),
                            },
                        )
                    })
                    .collect();
                render_json(view, &document)
            }
            (Self::Raw, Some(value)) => render_raw(view, value),
            (Self::Raw, None) => Diagnostics::from(
                Diagnostic::error("Output name required")
                    .with_detail("Raw output can only print a single named output value."),
            ),
        }
    }
}

fn not_found(name: &str) -> Diagnostic {
    Diagnostic::error(format!("Output \"{name}\" not found")).with_detail(
        "The output value requested could not be found in the state. If it was \
         added to the configuration recently, the state will only contain it \
         after the next apply.",
    )
}

fn text_value(value: &OutputValue) -> String {
    if value.is_sensitive() {
        SENSITIVE_PLACEHOLDER.to_string()
    } else {
        format_value(value.value())
    }
}

fn render_text_all<U: Ui>(view: &mut View<U>, outputs: &OutputSet) -> Diagnostics {
    if outputs.is_empty() {
        return Diagnostics::from(Diagnostic::info("No outputs found").with_detail(
            "The state has no outputs defined, or all of the defined outputs are \
             empty. Define an output in the configuration and apply it for it to \
             become available.",
        ));
    }

    let lines = outputs
        .iter()
        .map(|value| format!("{} = {}", value.name(), text_value(value)))
        .join("\n");
    view.output(&lines);
    Diagnostics::new()
}

fn render_json<U: Ui, T: Serialize + ?Sized>(view: &mut View<U>, document: &T) -> Diagnostics {
    match serde_json::to_string_pretty(document) {
        Ok(json) => {
            view.output(&json);
            Diagnostics::new()
        }
        Err(err) => Diagnostics::from(
            Diagnostic::error("Failed to encode outputs as JSON").with_detail(err.to_string()),
        ),
    }
}

fn render_raw<U: Ui>(view: &mut View<U>, value: &OutputValue) -> Diagnostics {
    let text = match value.value() {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => {
            return Diagnostics::from(unsupported_raw(format!(
                "The value for output value \"{}\" is null, so -raw mode cannot print it.",
                value.name()
            )));
        }
        Value::Array(_) | Value::Object(_) => {
            return Diagnostics::from(unsupported_raw(format!(
                "The -raw option only supports strings, numbers, and boolean values, \
                 but output value \"{}\" is {}, which is not a primitive value.\n\n\
                 Use the -json option for machine-readable representations of output \
                 values that have complex types.",
                value.name(),
                value.kind()
            )));
        }
    };

    view.output(&text);
    Diagnostics::new()
}

fn unsupported_raw(detail: String) -> Diagnostic {
    Diagnostic::error("Unsupported value for raw output").with_detail(detail)
}
