//! Configuration and state values

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dotted path to an attribute, e.g. `autoscale_config.auto_scaling_threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath(Vec<String>);

impl AttributePath {
    /// A top-level attribute.
    pub fn root(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Descend into the nested attribute `name`.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.0.push(name.into());
        self
    }

    /// Attribute names from the root down.
    pub fn steps(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Configuration of a data source or resource as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(Map<String, Value>);

impl Config {
    /// Wrap already-decoded values.
    pub fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    /// `None` unless `value` is a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(values) => Some(Self(values)),
            _ => None,
        }
    }

    /// Top-level value; nulls count as unset.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// Names of attributes that carry a value. Nulls count as unset.
    pub fn set_attributes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter(|(_, v)| !v.is_null()).map(|(k, _)| k.as_str())
    }

    /// A nested block, whether encoded as an object or a one-element list.
    pub fn block(&self, name: &str) -> Option<&Map<String, Value>> {
        block_of(self.get(name)?)
    }

    /// The value at `path`, descending through nested blocks.
    pub fn lookup(&self, path: &AttributePath) -> Option<&Value> {
        let (last, parents) = path.steps().split_last()?;
        let mut current = &self.0;
        for step in parents {
            current = block_of(current.get(step)?)?;
        }
        current.get(last).filter(|v| !v.is_null())
    }

    /// True when no attribute carries a value.
    pub fn is_empty(&self) -> bool {
        self.set_attributes().next().is_none()
    }
}

pub(crate) fn block_of(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.first().and_then(Value::as_object),
        _ => None,
    }
}

/// State written after a read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(Map<String, Value>);

impl State {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `id` attribute.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.0.insert("id".to_string(), Value::String(id.into()));
    }

    /// The `id` attribute, when set.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Set a top-level attribute.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    /// Top-level attribute.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The state as a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blocks_may_be_lists_or_objects() {
        let config = Config::from_value(json!({
            "listed": [{"a": "1"}],
            "object": {"b": "2"},
            "empty": [],
            "unset": null
        }))
        .unwrap();

        assert_eq!(config.block("listed").and_then(|b| b.get("a")), Some(&json!("1")));
        assert_eq!(config.block("object").and_then(|b| b.get("b")), Some(&json!("2")));
        assert!(config.block("empty").is_none());
        assert_eq!(config.set_attributes().count(), 3);
    }

    #[test]
    fn lookup_descends_through_blocks() {
        let config = Config::from_value(json!({
            "custom_setting_config": [{"db": [{"locktimeout": "30"}]}]
        }))
        .unwrap();
        let path = AttributePath::root("custom_setting_config").attribute("db").attribute("locktimeout");
        assert_eq!(config.lookup(&path), Some(&json!("30")));
        assert_eq!(path.to_string(), "custom_setting_config.db.locktimeout");
        assert!(config.lookup(&AttributePath::root("missing").attribute("x")).is_none());
    }

    #[test]
    fn null_only_config_is_empty() {
        assert!(Config::from_value(json!({"id": null})).unwrap().is_empty());
        assert!(Config::from_value(json!("scalar")).is_none());
    }
}
