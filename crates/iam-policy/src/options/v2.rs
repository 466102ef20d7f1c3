//! v2 policy operations

use std::collections::HashMap;

use ibmcloud_common::{SdkResult, Validate, ValidationError};

use crate::models::{
    Control, PolicyFormat, PolicyState, PolicyType, ServiceType, V2PolicyResource, V2PolicyRule,
    V2PolicySubject,
};

/// Options for `list_v2_policies`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListV2PoliciesOptions {
    pub account_id: String,
    pub accept_language: Option<String>,
    pub iam_id: Option<String>,
    pub access_group_id: Option<String>,
    pub policy_type: Option<PolicyType>,
    pub service_type: Option<ServiceType>,
    pub service_name: Option<String>,
    pub service_group_id: Option<String>,
    /// Any policy field, `-` prefixed for descending order.
    pub sort: Option<String>,
    pub format: Option<PolicyFormat>,
    pub state: Option<PolicyState>,
    pub headers: HashMap<String, String>,
}

impl ListV2PoliciesOptions {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            accept_language: None,
            iam_id: None,
            access_group_id: None,
            policy_type: None,
            service_type: None,
            service_name: None,
            service_group_id: None,
            sort: None,
            format: None,
            state: None,
            headers: HashMap::new(),
        }
    }
}

optional_setters!(ListV2PoliciesOptions {
    with_accept_language => accept_language: String,
    with_iam_id => iam_id: String,
    with_access_group_id => access_group_id: String,
    with_type => policy_type: PolicyType,
    with_service_type => service_type: ServiceType,
    with_service_name => service_name: String,
    with_service_group_id => service_group_id: String,
    with_sort => sort: String,
    with_format => format: PolicyFormat,
    with_state => state: PolicyState,
});

impl Validate for ListV2PoliciesOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("account_id", &self.account_id);
        errors.into_result()
    }
}

/// Options for `create_v2_policy`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateV2PolicyOptions {
    pub control: Control,
    pub policy_type: PolicyType,
    pub description: Option<String>,
    pub subject: Option<V2PolicySubject>,
    pub resource: Option<V2PolicyResource>,
    pub pattern: Option<String>,
    pub rule: Option<V2PolicyRule>,
    pub accept_language: Option<String>,
    pub headers: HashMap<String, String>,
}

impl CreateV2PolicyOptions {
    pub fn new(control: Control, policy_type: impl Into<PolicyType>) -> Self {
        Self {
            control,
            policy_type: policy_type.into(),
            description: None,
            subject: None,
            resource: None,
            pattern: None,
            rule: None,
            accept_language: None,
            headers: HashMap::new(),
        }
    }
}

optional_setters!(CreateV2PolicyOptions {
    with_description => description: String,
    with_subject => subject: V2PolicySubject,
    with_resource => resource: V2PolicyResource,
    with_pattern => pattern: String,
    with_rule => rule: V2PolicyRule,
    with_accept_language => accept_language: String,
});

impl Validate for CreateV2PolicyOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("control.grant.roles", &self.control.grant.roles);
        errors.require("type", self.policy_type.as_str());
        errors.into_result()
    }
}

/// Options for `replace_v2_policy`
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceV2PolicyOptions {
    pub id: String,
    pub if_match: String,
    pub control: Control,
    pub policy_type: PolicyType,
    pub description: Option<String>,
    pub subject: Option<V2PolicySubject>,
    pub resource: Option<V2PolicyResource>,
    pub pattern: Option<String>,
    pub rule: Option<V2PolicyRule>,
    pub headers: HashMap<String, String>,
}

impl ReplaceV2PolicyOptions {
    pub fn new(
        id: impl Into<String>,
        if_match: impl Into<String>,
        control: Control,
        policy_type: impl Into<PolicyType>,
    ) -> Self {
        Self {
            id: id.into(),
            if_match: if_match.into(),
            control,
            policy_type: policy_type.into(),
            description: None,
            subject: None,
            resource: None,
            pattern: None,
            rule: None,
            headers: HashMap::new(),
        }
    }
}

optional_setters!(ReplaceV2PolicyOptions {
    with_description => description: String,
    with_subject => subject: V2PolicySubject,
    with_resource => resource: V2PolicyResource,
    with_pattern => pattern: String,
    with_rule => rule: V2PolicyRule,
});

impl Validate for ReplaceV2PolicyOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("id", &self.id);
        errors.require("if_match", &self.if_match);
        errors.require("control.grant.roles", &self.control.grant.roles);
        errors.require("type", self.policy_type.as_str());
        errors.into_result()
    }
}

/// Options for `get_v2_policy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetV2PolicyOptions {
    pub id: String,
    pub format: Option<PolicyFormat>,
    pub headers: HashMap<String, String>,
}

impl GetV2PolicyOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), format: None, headers: HashMap::new() }
    }
}

optional_setters!(GetV2PolicyOptions {
    with_format => format: PolicyFormat,
});

impl Validate for GetV2PolicyOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("id", &self.id);
        errors.into_result()
    }
}

/// Options for `delete_v2_policy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteV2PolicyOptions {
    pub id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteV2PolicyOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), headers: HashMap::new() }
    }
}

optional_setters!(DeleteV2PolicyOptions {});

impl Validate for DeleteV2PolicyOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("id", &self.id);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grant, Roles};

    #[test]
    fn create_requires_granted_roles() {
        let empty = CreateV2PolicyOptions::new(Control::new(Grant::new(Vec::new())), "access");
        assert!(empty.validate().unwrap_err().message().contains("control.grant.roles"));

        let grant = Grant::new(vec![Roles::new("crn:v1:bluemix:public:iam::::role:Viewer").unwrap()]);
        let options = CreateV2PolicyOptions::new(Control::new(grant), PolicyType::Access)
            .with_pattern("time-based-conditions:weekly:all-day");
        assert!(options.validate().is_ok());
        assert_eq!(options.pattern.as_deref(), Some("time-based-conditions:weekly:all-day"));
    }
}
