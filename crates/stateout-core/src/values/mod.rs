//! Output values as read from state
//!
//! Values are dynamically typed (`serde_json::Value`). Each carries the type
//! descriptor recorded in state, or one inferred from the value, plus its
//! sensitivity flag.

mod pretty;

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};
use strum::Display;

pub use pretty::format_value;

/// Placeholder shown instead of a sensitive value in human-oriented output.
pub const SENSITIVE_PLACEHOLDER: &str = "<sensitive>";

/// A named output value of the root module.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputValue {
    name: String,
    value: Value,
    ty: Value,
    sensitive: bool,
}

impl OutputValue {
    /// Create a non-sensitive value whose type is inferred from `value`.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        let ty = infer_type(&value);
        Self {
            name: name.into(),
            value,
            ty,
            sensitive: false,
        }
    }

    #[must_use]
    pub fn with_type(self, ty: Value) -> Self {
        Self { ty, ..self }
    }

    #[must_use]
    pub fn with_sensitive(self, sensitive: bool) -> Self {
        Self { sensitive, ..self }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Type descriptor, e.g. `"string"` or `["tuple", ["number"]]`.
    pub const fn ty(&self) -> &Value {
        &self.ty
    }

    pub const fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    pub fn kind(&self) -> ValueKind {
        ValueKind::of(&self.value)
    }
}

/// Coarse shape of a value, enough to decide how it can be printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ValueKind {
    #[strum(to_string = "null")]
    Null,
    #[strum(to_string = "a bool")]
    Bool,
    #[strum(to_string = "a number")]
    Number,
    #[strum(to_string = "a string")]
    String,
    #[strum(to_string = "a list")]
    List,
    #[strum(to_string = "a map")]
    Map,
}

impl ValueKind {
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::List,
            Value::Object(_) => Self::Map,
        }
    }

    /// Strings, numbers and bools: values with an obvious bare text form.
    #[must_use]
    pub const fn is_primitive(self) -> bool {
        matches!(self, Self::Bool | Self::Number | Self::String)
    }
}

/// Infer a type descriptor for a value with no recorded type.
#[must_use]
pub fn infer_type(value: &Value) -> Value {
    match value {
        Value::Null => json!("dynamic"),
        Value::Bool(_) => json!("bool"),
        Value::Number(_) => json!("number"),
        Value::String(_) => json!("string"),
        Value::Array(items) => json!(["tuple", items.iter().map(infer_type).collect::<Vec<_>>()]),
        Value::Object(fields) => {
            let field_types: Map<String, Value> = fields
                .iter()
                .map(|(key, field)| (key.clone(), infer_type(field)))
                .collect();
            json!(["object", field_types])
        }
    }
}

/// The outputs of the root module, keyed and iterated by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSet(BTreeMap<String, OutputValue>);

impl OutputSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a value under its own name, replacing any previous one.
    pub fn insert(&mut self, value: OutputValue) -> Option<OutputValue> {
        self.0.insert(value.name.clone(), value)
    }

    pub fn get(&self, name: &str) -> Option<&OutputValue> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Values in name order.
    pub fn iter(&self) -> impl Iterator<Item = &OutputValue> {
        self.0.values()
    }
}

impl FromIterator<OutputValue> for OutputSet {
    fn from_iter<I: IntoIterator<Item = OutputValue>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|value| (value.name.clone(), value))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_scalar_types() {
        assert_eq!(infer_type(&json!("x")), json!("string"));
        assert_eq!(infer_type(&json!(1)), json!("number"));
        assert_eq!(infer_type(&json!(true)), json!("bool"));
        assert_eq!(infer_type(&Value::Null), json!("dynamic"));
    }

    #[test]
    fn test_infer_nested_types() {
        let value = json!({"ports": [80, 443], "name": "web"});
        assert_eq!(
            infer_type(&value),
            json!(["object", {"name": "string", "ports": ["tuple", ["number", "number"]]}])
        );
    }

    #[test]
    fn test_recorded_type_wins() {
        let value = OutputValue::new("ids", json!(["a"])).with_type(json!(["list", "string"]));
        assert_eq!(value.ty(), &json!(["list", "string"]));
    }

    #[test]
    fn test_value_kind() {
        assert!(ValueKind::of(&json!("s")).is_primitive());
        assert!(ValueKind::of(&json!(2.5)).is_primitive());
        assert!(ValueKind::of(&json!(false)).is_primitive());
        assert!(!ValueKind::of(&json!([])).is_primitive());
        assert!(!ValueKind::of(&json!({})).is_primitive());
        assert!(!ValueKind::of(&Value::Null).is_primitive());
        assert_eq!(ValueKind::List.to_string(), "a list");
    }

    #[test]
    fn test_output_set_iterates_in_name_order() {
        let set: OutputSet = vec![
            OutputValue::new("zeta", json!(1)),
            OutputValue::new("alpha", json!(2)),
            OutputValue::new("mid", json!(3)),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = set.iter().map(OutputValue::name).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_output_set_insert_replaces() {
        let mut set = OutputSet::new();
        assert!(set.insert(OutputValue::new("a", json!(1))).is_none());
        let previous = set.insert(OutputValue::new("a", json!(2)).with_sensitive(true));
        assert_eq!(previous.map(|v| v.value().clone()), Some(json!(1)));
        assert!(set.get("a").is_some_and(OutputValue::is_sensitive));
    }
}
