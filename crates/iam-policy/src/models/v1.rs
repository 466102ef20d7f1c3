//! v1 policies

use chrono::{DateTime, Utc};
use ibmcloud_common::{SdkResult, ValidationError};
use serde::{Deserialize, Serialize};

use super::enums::{AttributeOperator, PolicyState, PolicyType};

/// A v1 policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub subjects: Vec<PolicySubject>,
    pub roles: Vec<PolicyRole>,
    pub resources: Vec<PolicyResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PolicyState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyList {
    #[serde(default)]
    pub policies: Vec<Policy>,
}

/// A role granted by a v1 policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRole {
    /// Role CRN.
    pub role_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PolicyRole {
    /// # Errors
    /// `struct-validation-error` when `role_id` is empty.
    pub fn new(role_id: impl Into<String>) -> SdkResult<Self> {
        let role_id = ibmcloud_common::require_value("role_id", role_id.into())?;
        Ok(Self { role_id, display_name: None, description: None })
    }
}

/// Who a v1 policy applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySubject {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<SubjectAttribute>,
}

impl PolicySubject {
    pub fn new(attributes: Vec<SubjectAttribute>) -> Self {
        Self { attributes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAttribute {
    pub name: String,
    pub value: String,
}

impl SubjectAttribute {
    /// # Errors
    /// `struct-validation-error` when either value is empty.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> SdkResult<Self> {
        let attribute = Self { name: name.into(), value: value.into() };
        let mut errors = ValidationError::new();
        errors.require("name", &attribute.name);
        errors.require("value", &attribute.value);
        errors.into_result()?;
        Ok(attribute)
    }
}

/// What a v1 policy applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyResource {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ResourceAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceTag>,
}

impl PolicyResource {
    pub fn new(attributes: Vec<ResourceAttribute>) -> Self {
        Self { attributes, tags: Vec::new() }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<ResourceTag>) -> Self {
        self.tags = tags;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAttribute {
    pub name: String,
    pub value: String,
    /// Defaults to `stringEquals` on the service side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<AttributeOperator>,
}

impl ResourceAttribute {
    /// # Errors
    /// `struct-validation-error` when either value is empty.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> SdkResult<Self> {
        let attribute = Self { name: name.into(), value: value.into(), operator: None };
        let mut errors = ValidationError::new();
        errors.require("name", &attribute.name);
        errors.require("value", &attribute.value);
        errors.into_result()?;
        Ok(attribute)
    }

    #[must_use]
    pub fn with_operator(mut self, operator: impl Into<AttributeOperator>) -> Self {
        self.operator = Some(operator.into());
        self
    }
}

/// An access management tag on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTag {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<AttributeOperator>,
}

impl ResourceTag {
    /// # Errors
    /// `struct-validation-error` when either value is empty.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> SdkResult<Self> {
        let tag = Self { name: name.into(), value: value.into(), operator: None };
        let mut errors = ValidationError::new();
        errors.require("name", &tag.name);
        errors.require("value", &tag.value);
        errors.into_result()?;
        Ok(tag)
    }

    #[must_use]
    pub fn with_operator(mut self, operator: impl Into<AttributeOperator>) -> Self {
        self.operator = Some(operator.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use ibmcloud_common::codes;
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_policy_with_timestamps() {
        let policy: Policy = serde_json::from_value(json!({
            "id": "12345678abcd1a2ba0f8a4e2",
            "type": "access",
            "subjects": [{"attributes": [{"name": "iam_id", "value": "IBMid-1"}]}],
            "roles": [{"role_id": "crn:v1:bluemix:public:iam::::role:Viewer", "display_name": "Viewer"}],
            "resources": [{
                "attributes": [{"name": "accountId", "value": "acct", "operator": "stringEquals"}],
                "tags": [{"name": "project", "value": "prototype"}]
            }],
            "created_at": "2024-01-02T03:04:05Z",
            "state": "active"
        }))
        .unwrap();

        assert_eq!(policy.policy_type, PolicyType::Access);
        assert_eq!(policy.state, Some(PolicyState::Active));
        assert_eq!(policy.created_at.unwrap().to_rfc3339(), "2024-01-02T03:04:05+00:00");
        assert_eq!(
            policy.resources[0].attributes[0].operator,
            Some(AttributeOperator::StringEquals)
        );
        assert!(policy.resources[0].tags[0].operator.is_none());
    }

    #[test]
    fn round_trip_omits_unset_fields() {
        let policy = Policy {
            id: None,
            policy_type: PolicyType::Authorization,
            description: None,
            subjects: vec![PolicySubject::new(vec![
                SubjectAttribute::new("serviceName", "cloud-object-storage").unwrap(),
            ])],
            roles: vec![PolicyRole::new("crn:v1:bluemix:public:iam::::serviceRole:Reader").unwrap()],
            resources: vec![PolicyResource::new(vec![
                ResourceAttribute::new("serviceName", "kms").unwrap(),
            ])],
            href: None,
            created_at: None,
            created_by_id: None,
            last_modified_at: None,
            last_modified_by_id: None,
            state: None,
        };

        let value = serde_json::to_value(&policy).unwrap();
        assert!(value.get("id").is_none());
        assert!(value["resources"][0].get("tags").is_none());
        assert_eq!(serde_json::from_value::<Policy>(value).unwrap(), policy);
    }

    #[test]
    fn constructors_reject_empty_values() {
        assert_eq!(PolicyRole::new("").unwrap_err().code(), codes::STRUCT_VALIDATION_ERROR);
        assert!(SubjectAttribute::new("iam_id", "").is_err());
        assert!(ResourceTag::new("", "x").is_err());
    }
}
