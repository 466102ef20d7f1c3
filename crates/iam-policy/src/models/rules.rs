//! Time-based policy rules
//!
//! A rule is either a single [`RuleAttribute`] or an `and`/`or` group of
//! conditions. The JSON carries no type tag: an object with a `conditions`
//! key is a group, anything else is an attribute. Groups may nest one level.

use ibmcloud_common::{SdkResult, ValidationError};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{ConditionOperator, RuleOperator};

/// A single condition such as `{{environment.attributes.day_of_week}}
/// dayOfWeekAnyOf [1, 2, 3, 4, 5]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleAttribute {
    pub key: String,
    pub operator: RuleOperator,
    /// A string, number, boolean or list, depending on the operator.
    pub value: Value,
}

impl RuleAttribute {
    /// # Errors
    /// `struct-validation-error` when `key` is empty or `value` is null.
    pub fn new(
        key: impl Into<String>,
        operator: impl Into<RuleOperator>,
        value: impl Into<Value>,
    ) -> SdkResult<Self> {
        let attribute = Self { key: key.into(), operator: operator.into(), value: value.into() };
        let mut errors = ValidationError::new();
        errors.require("key", &attribute.key);
        errors.require("operator", attribute.operator.as_str());
        errors.require("value", &attribute.value);
        errors.into_result()?;
        Ok(attribute)
    }
}

/// Rule of a v2 policy or policy template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum V2PolicyRule {
    /// A group of conditions combined with `and`/`or`.
    WithConditions { operator: ConditionOperator, conditions: Vec<NestedCondition> },
    Attribute(RuleAttribute),
}

/// One member of a rule's condition group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NestedCondition {
    WithConditions { operator: ConditionOperator, conditions: Vec<RuleAttribute> },
    Attribute(RuleAttribute),
}

impl V2PolicyRule {
    /// Every attribute in the rule, depth first.
    pub fn attributes(&self) -> Vec<&RuleAttribute> {
        match self {
            Self::Attribute(attribute) => vec![attribute],
            Self::WithConditions { conditions, .. } => conditions
                .iter()
                .flat_map(|condition| match condition {
                    NestedCondition::Attribute(attribute) => vec![attribute],
                    NestedCondition::WithConditions { conditions, .. } => conditions.iter().collect(),
                })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct Group<T> {
    operator: ConditionOperator,
    conditions: Vec<T>,
}

fn has_conditions(value: &Value) -> bool {
    value.as_object().is_some_and(|object| object.contains_key("conditions"))
}

impl<'de> Deserialize<'de> for V2PolicyRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if has_conditions(&value) {
            let group: Group<NestedCondition> =
                serde_json::from_value(value).map_err(de::Error::custom)?;
            Ok(Self::WithConditions { operator: group.operator, conditions: group.conditions })
        } else {
            serde_json::from_value(value).map(Self::Attribute).map_err(de::Error::custom)
        }
    }
}

impl<'de> Deserialize<'de> for NestedCondition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if has_conditions(&value) {
            let group: Group<RuleAttribute> =
                serde_json::from_value(value).map_err(de::Error::custom)?;
            Ok(Self::WithConditions { operator: group.operator, conditions: group.conditions })
        } else {
            serde_json::from_value(value).map(Self::Attribute).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flat_rule_decodes_as_attribute() {
        let rule: V2PolicyRule = serde_json::from_value(json!({
            "key": "{{environment.attributes.current_time}}",
            "operator": "timeGreaterThanOrEquals",
            "value": "09:00:00+00:00"
        }))
        .unwrap();

        match &rule {
            V2PolicyRule::Attribute(attribute) => {
                assert_eq!(attribute.operator, RuleOperator::TimeGreaterThanOrEquals);
            }
            other => panic!("expected attribute, got {other:?}"),
        }
    }

    #[test]
    fn grouped_rule_decodes_nested_groups() {
        let value = json!({
            "operator": "and",
            "conditions": [
                {
                    "key": "{{environment.attributes.day_of_week}}",
                    "operator": "dayOfWeekAnyOf",
                    "value": ["1+00:00", "2+00:00"]
                },
                {
                    "operator": "or",
                    "conditions": [
                        {"key": "{{environment.attributes.current_time}}", "operator": "timeLessThan", "value": "17:00:00+00:00"},
                        {"key": "{{environment.attributes.current_time}}", "operator": "timeGreaterThan", "value": "20:00:00+00:00"}
                    ]
                }
            ]
        });

        let rule: V2PolicyRule = serde_json::from_value(value.clone()).unwrap();
        let V2PolicyRule::WithConditions { operator, conditions } = &rule else {
            panic!("expected a condition group");
        };
        assert_eq!(*operator, ConditionOperator::And);
        assert!(matches!(conditions[1], NestedCondition::WithConditions { .. }));
        assert_eq!(rule.attributes().len(), 3);

        assert_eq!(serde_json::to_value(&rule).unwrap(), value);
    }

    #[test]
    fn malformed_group_is_an_error() {
        let err = serde_json::from_value::<V2PolicyRule>(json!({"conditions": []})).unwrap_err();
        assert!(err.to_string().contains("operator"));
    }

    #[test]
    fn attribute_requires_key_and_value() {
        assert!(RuleAttribute::new("", RuleOperator::TimeLessThan, "17:00:00+00:00").is_err());
        assert!(RuleAttribute::new("{{k}}", RuleOperator::TimeLessThan, Value::Null).is_err());
        assert!(RuleAttribute::new("{{k}}", "dayOfWeekEquals", json!(1)).is_ok());
    }
}
