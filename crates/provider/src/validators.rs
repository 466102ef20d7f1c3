//! Reusable configuration validators

use std::fmt::Display;

use serde_json::Value;

use crate::datasource::ConfigValidator;
use crate::diagnostics::Diagnostics;
use crate::value::{AttributePath, Config};

/// Rejects any configured attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArguments;

impl ConfigValidator for NoArguments {
    fn description(&self) -> String {
        "This data source accepts no arguments".to_string()
    }

    fn validate(&self, config: &Config) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for name in config.set_attributes() {
            if name == "id" {
                continue;
            }
            diags.add_attribute_error(
                AttributePath::root(name),
                "Unexpected argument",
                format!("'{name}' cannot be set on this data source"),
            );
        }
        diags
    }
}

/// Requires a string attribute, when set, to parse as `T` within bounds.
///
/// Numbers written without quotes are accepted too.
#[derive(Debug, Clone)]
pub struct NumericString<T> {
    path: AttributePath,
    min: Option<T>,
    max: Option<T>,
}

impl<T> NumericString<T> {
    /// Unbounded check of the attribute at `path`.
    pub fn new(path: AttributePath) -> Self {
        Self { path, min: None, max: None }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub fn min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound.
    #[must_use]
    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    /// Inclusive bounds on both ends.
    #[must_use]
    pub fn between(self, min: T, max: T) -> Self {
        self.min(min).max(max)
    }
}

impl<T> ConfigValidator for NumericString<T>
where
    T: std::str::FromStr + PartialOrd + Display + Send + Sync,
{
    fn description(&self) -> String {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) => format!("{} must be a number between {min} and {max}", self.path),
            (Some(min), None) => format!("{} must be a number of at least {min}", self.path),
            (None, Some(max)) => format!("{} must be a number of at most {max}", self.path),
            (None, None) => format!("{} must be a number", self.path),
        }
    }

    fn validate(&self, config: &Config) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let Some(value) = config.lookup(&self.path) else {
            return diags;
        };

        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            other => {
                diags.add_attribute_error(
                    self.path.clone(),
                    "Invalid attribute type",
                    format!("expected a numeric string, got {other}"),
                );
                return diags;
            }
        };

        let in_range = text.parse::<T>().ok().filter(|n| {
            self.min.as_ref().map_or(true, |min| n >= min) && self.max.as_ref().map_or(true, |max| n <= max)
        });
        if in_range.is_none() {
            diags.add_attribute_error(
                self.path.clone(),
                "Invalid attribute value",
                format!("{} (got '{text}')", self.description()),
            );
        }
        diags
    }
}

/// Restricts the keys of a nested block to a known set, ignoring case.
#[derive(Debug, Clone)]
pub struct KnownKeys {
    path: AttributePath,
    known: &'static [&'static str],
}

impl KnownKeys {
    /// Check the block at `path` against `known` names.
    pub fn new(path: AttributePath, known: &'static [&'static str]) -> Self {
        Self { path, known }
    }
}

impl ConfigValidator for KnownKeys {
    fn description(&self) -> String {
        format!("{} only accepts known setting names", self.path)
    }

    fn validate(&self, config: &Config) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let Some(block) = config.lookup(&self.path).and_then(crate::value::block_of) else {
            return diags;
        };
        for (key, value) in block {
            if value.is_null() || self.known.iter().any(|k| k.eq_ignore_ascii_case(key)) {
                continue;
            }
            diags.add_attribute_error(
                self.path.clone().attribute(key.as_str()),
                "Unknown setting",
                format!("'{key}' is not a recognised setting"),
            );
        }
        diags
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config(value: Value) -> Config {
        Config::from_value(value).unwrap()
    }

    #[test]
    fn no_arguments_rejects_everything_but_id() {
        assert!(NoArguments.validate(&config(json!({"id": null}))).is_empty());
        assert!(NoArguments.validate(&config(json!({"id": "x"}))).is_empty());
        let diags = NoArguments.validate(&config(json!({"deployment_id": "crn"})));
        assert!(diags.has_error());
    }

    #[test]
    fn numeric_string_checks_bounds() {
        let validator = NumericString::<i64>::new(
            AttributePath::root("autoscale_config").attribute("auto_scaling_threshold"),
        )
        .between(1, 100);

        let ok = config(json!({"autoscale_config": [{"auto_scaling_threshold": "90"}]}));
        assert!(validator.validate(&ok).is_empty());
        let unquoted = config(json!({"autoscale_config": [{"auto_scaling_threshold": 50}]}));
        assert!(validator.validate(&unquoted).is_empty());
        let unset = config(json!({"autoscale_config": [{}]}));
        assert!(validator.validate(&unset).is_empty());

        for bad in [json!("0"), json!("101"), json!("ninety"), json!(true)] {
            let cfg = config(json!({"autoscale_config": [{"auto_scaling_threshold": bad}]}));
            assert!(validator.validate(&cfg).has_error(), "{cfg:?}");
        }
    }

    #[test]
    fn known_keys_ignore_case() {
        let validator = KnownKeys::new(AttributePath::root("db"), &["LOCKTIMEOUT", "LOGBUFSZ"]);
        assert!(validator.validate(&config(json!({"db": [{"locktimeout": "30"}]}))).is_empty());
        let diags = validator.validate(&config(json!({"db": [{"lock_timeout": "30"}]})));
        assert_eq!(diags.errors().next().unwrap().attribute.as_ref().unwrap().to_string(), "db.lock_timeout");
    }
}
