//! v2 policies

use chrono::{DateTime, Utc};
use ibmcloud_common::{SdkResult, ValidationError};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{AttributeOperator, PolicyState, PolicyType};
use super::roles::RoleAction;
use super::rules::V2PolicyRule;

/// The access a v2 policy grants, as sent on create and replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub grant: Grant,
}

impl Control {
    pub fn new(grant: Grant) -> Self {
        Self { grant }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub roles: Vec<Roles>,
}

impl Grant {
    pub fn new(roles: Vec<Roles>) -> Self {
        Self { roles }
    }
}

/// A role reference inside a grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    pub role_id: String,
}

impl Roles {
    /// # Errors
    /// `struct-validation-error` when `role_id` is empty.
    pub fn new(role_id: impl Into<String>) -> SdkResult<Self> {
        Ok(Self { role_id: ibmcloud_common::require_value("role_id", role_id.into())? })
    }
}

/// A grant whose roles carry display names and actions; returned with
/// `format=display`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantWithEnrichedRoles {
    pub roles: Vec<EnrichedRoles>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRoles {
    pub role_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absent for roles the service did not enrich, which can happen within
    /// an otherwise enriched grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<RoleAction>>,
}

/// The control of a v2 policy as returned by the service.
///
/// Decodes as [`ControlResponse::GrantWithEnrichedRoles`] when any role
/// carries an `actions` key; roles without one keep `actions: None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ControlResponse {
    Grant { grant: Grant },
    GrantWithEnrichedRoles { grant: GrantWithEnrichedRoles },
}

impl ControlResponse {
    /// Role ids of the grant, whichever shape it has.
    pub fn role_ids(&self) -> Vec<&str> {
        match self {
            Self::Grant { grant } => grant.roles.iter().map(|role| role.role_id.as_str()).collect(),
            Self::GrantWithEnrichedRoles { grant } => {
                grant.roles.iter().map(|role| role.role_id.as_str()).collect()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ControlResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Wrapper<T> {
            grant: T,
        }

        let value = Value::deserialize(deserializer)?;
        let enriched = value
            .pointer("/grant/roles")
            .and_then(Value::as_array)
            .is_some_and(|roles| roles.iter().any(|role| role.get("actions").is_some()));

        if enriched {
            let wrapper: Wrapper<GrantWithEnrichedRoles> =
                serde_json::from_value(value).map_err(de::Error::custom)?;
            Ok(Self::GrantWithEnrichedRoles { grant: wrapper.grant })
        } else {
            let wrapper: Wrapper<Grant> = serde_json::from_value(value).map_err(de::Error::custom)?;
            Ok(Self::Grant { grant: wrapper.grant })
        }
    }
}

/// A v2 policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct V2Policy {
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<V2PolicySubject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<V2PolicyResource>,
    /// Pattern of the rule, e.g. `time-based-conditions:weekly:custom-hours`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<V2PolicyRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub control: ControlResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by_id: Option<String>,
    pub state: PolicyState,
    /// Returned with `format=include_last_permit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_permit_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_permit_frequency: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V2PolicyCollection {
    #[serde(default)]
    pub policies: Vec<V2Policy>,
}

/// Who a v2 policy applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct V2PolicySubject {
    pub attributes: Vec<V2PolicySubjectAttribute>,
}

impl V2PolicySubject {
    pub fn new(attributes: Vec<V2PolicySubjectAttribute>) -> Self {
        Self { attributes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct V2PolicySubjectAttribute {
    pub key: String,
    pub operator: AttributeOperator,
    pub value: String,
}

impl V2PolicySubjectAttribute {
    /// # Errors
    /// `struct-validation-error` when `key` or `value` is empty.
    pub fn new(
        key: impl Into<String>,
        operator: impl Into<AttributeOperator>,
        value: impl Into<String>,
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

/// What a v2 policy applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct V2PolicyResource {
    pub attributes: Vec<V2PolicyResourceAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<V2PolicyResourceTag>,
}

impl V2PolicyResource {
    pub fn new(attributes: Vec<V2PolicyResourceAttribute>) -> Self {
        Self { attributes, tags: Vec::new() }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<V2PolicyResourceTag>) -> Self {
        self.tags = tags;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct V2PolicyResourceAttribute {
    pub key: String,
    pub operator: AttributeOperator,
    /// A string, or a boolean for `stringExists`.
    pub value: Value,
}

impl V2PolicyResourceAttribute {
    /// # Errors
    /// `struct-validation-error` when `key` is empty or `value` is null.
    pub fn new(
        key: impl Into<String>,
        operator: impl Into<AttributeOperator>,
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct V2PolicyResourceTag {
    pub key: String,
    pub value: String,
    pub operator: AttributeOperator,
}

impl V2PolicyResourceTag {
    /// # Errors
    /// `struct-validation-error` when `key` or `value` is empty.
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        operator: impl Into<AttributeOperator>,
    ) -> SdkResult<Self> {
        let tag = Self { key: key.into(), value: value.into(), operator: operator.into() };
        let mut errors = ValidationError::new();
        errors.require("key", &tag.key);
        errors.require("value", &tag.value);
        errors.into_result()?;
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn control_without_actions_is_plain_grant() {
        let control: ControlResponse = serde_json::from_value(json!({
            "grant": {"roles": [{"role_id": "crn:v1:bluemix:public:iam::::role:Viewer"}]}
        }))
        .unwrap();
        assert!(matches!(control, ControlResponse::Grant { .. }));
        assert_eq!(control.role_ids(), vec!["crn:v1:bluemix:public:iam::::role:Viewer"]);
    }

    #[test]
    fn control_with_actions_is_enriched() {
        let value = json!({
            "grant": {"roles": [{
                "role_id": "crn:v1:bluemix:public:iam::::role:Viewer",
                "display_name": "Viewer",
                "actions": [{"id": "iam.policy.read", "display_name": "Read", "description": "Read policies"}]
            }]}
        });
        let control: ControlResponse = serde_json::from_value(value.clone()).unwrap();

        let ControlResponse::GrantWithEnrichedRoles { grant } = &control else {
            panic!("expected enriched roles");
        };
        assert_eq!(grant.roles[0].actions.as_ref().unwrap()[0].id, "iam.policy.read");
        assert_eq!(serde_json::to_value(&control).unwrap(), value);
    }

    #[test]
    fn control_mixing_enriched_and_plain_roles_decodes() {
        let value = json!({
            "grant": {"roles": [
                {"role_id": "crn:v1:bluemix:public:iam::::role:Viewer", "actions": []},
                {"role_id": "crn:v1:bluemix:public:iam::::role:Editor"}
            ]}
        });
        let control: ControlResponse = serde_json::from_value(value.clone()).unwrap();

        let ControlResponse::GrantWithEnrichedRoles { grant } = &control else {
            panic!("expected enriched roles");
        };
        assert_eq!(grant.roles[0].actions.as_deref(), Some(&[][..]));
        assert!(grant.roles[1].actions.is_none());
        assert_eq!(
            control.role_ids(),
            vec!["crn:v1:bluemix:public:iam::::role:Viewer", "crn:v1:bluemix:public:iam::::role:Editor"]
        );
        assert_eq!(serde_json::to_value(&control).unwrap(), value);
    }

    #[test]
    fn decodes_v2_policy() {
        let policy: V2Policy = serde_json::from_value(json!({
            "id": "policy-1",
            "type": "access",
            "subject": {"attributes": [{"key": "iam_id", "operator": "stringEquals", "value": "IBMid-1"}]},
            "resource": {"attributes": [{"key": "serviceType", "operator": "stringEquals", "value": "service"}]},
            "pattern": "time-based-conditions:once",
            "rule": {
                "operator": "and",
                "conditions": [
                    {"key": "{{environment.attributes.current_date_time}}", "operator": "dateTimeGreaterThanOrEquals", "value": "2024-01-01T09:00:00+00:00"},
                    {"key": "{{environment.attributes.current_date_time}}", "operator": "dateTimeLessThanOrEquals", "value": "2024-01-06T17:00:00+00:00"}
                ]
            },
            "control": {"grant": {"roles": [{"role_id": "crn:v1:bluemix:public:iam::::role:Editor"}]}},
            "state": "active",
            "last_permit_frequency": 3
        }))
        .unwrap();

        assert_eq!(policy.state, PolicyState::Active);
        assert_eq!(policy.rule.as_ref().unwrap().attributes().len(), 2);
        assert_eq!(policy.last_permit_frequency, Some(3));
    }

    #[test]
    fn resource_attribute_accepts_boolean_value() {
        let attribute =
            V2PolicyResourceAttribute::new("resourceGroupId", AttributeOperator::StringExists, true)
                .unwrap();
        assert_eq!(
            serde_json::to_value(&attribute).unwrap(),
            json!({"key": "resourceGroupId", "operator": "stringExists", "value": true})
        );
        assert!(V2PolicyResourceAttribute::new("k", "stringEquals", Value::Null).is_err());
    }
}
