//! Policy template operations

use std::collections::HashMap;

use ibmcloud_common::{SdkResult, Validate, ValidationError};

use crate::models::{PolicyTemplateState, PolicyType, ServiceType};

/// Options for `list_policy_templates`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPolicyTemplatesOptions {
    pub account_id: String,
    pub accept_language: Option<String>,
    pub state: Option<PolicyTemplateState>,
    pub name: Option<String>,
    pub policy_service_type: Option<ServiceType>,
    pub policy_service_name: Option<String>,
    pub policy_service_group_id: Option<String>,
    pub policy_type: Option<PolicyType>,
    /// Page size.
    pub limit: Option<i64>,
    /// Page token from a previous listing.
    pub start: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ListPolicyTemplatesOptions {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            accept_language: None,
            state: None,
            name: None,
            policy_service_type: None,
            policy_service_name: None,
            policy_service_group_id: None,
            policy_type: None,
            limit: None,
            start: None,
            headers: HashMap::new(),
        }
    }
}

optional_setters!(ListPolicyTemplatesOptions {
    with_accept_language => accept_language: String,
    with_state => state: PolicyTemplateState,
    with_name => name: String,
    with_policy_service_type => policy_service_type: ServiceType,
    with_policy_service_name => policy_service_name: String,
    with_policy_service_group_id => policy_service_group_id: String,
    with_policy_type => policy_type: PolicyType,
    with_limit => limit: i64,
    with_start => start: String,
});

impl Validate for ListPolicyTemplatesOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("account_id", &self.account_id);
        if let Some(limit) = self.limit {
            if !(1..=100).contains(&limit) {
                errors.add_field_error("limit", "must be between 1 and 100");
            }
        }
        errors.into_result()
    }
}

/// Options for `get_policy_template`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPolicyTemplateOptions {
    pub policy_template_id: String,
    pub state: Option<PolicyTemplateState>,
    pub headers: HashMap<String, String>,
}

impl GetPolicyTemplateOptions {
    pub fn new(policy_template_id: impl Into<String>) -> Self {
        Self { policy_template_id: policy_template_id.into(), state: None, headers: HashMap::new() }
    }
}

optional_setters!(GetPolicyTemplateOptions {
    with_state => state: PolicyTemplateState,
});

impl Validate for GetPolicyTemplateOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("policy_template_id", &self.policy_template_id);
        errors.into_result()
    }
}

/// Options for `get_policy_template_version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPolicyTemplateVersionOptions {
    pub policy_template_id: String,
    pub version: String,
    pub headers: HashMap<String, String>,
}

impl GetPolicyTemplateVersionOptions {
    pub fn new(policy_template_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            policy_template_id: policy_template_id.into(),
            version: version.into(),
            headers: HashMap::new(),
        }
    }
}

optional_setters!(GetPolicyTemplateVersionOptions {});

impl Validate for GetPolicyTemplateVersionOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("policy_template_id", &self.policy_template_id);
        errors.require("version", &self.version);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_must_be_in_range() {
        assert!(ListPolicyTemplatesOptions::new("acct").with_limit(50).validate().is_ok());
        let err = ListPolicyTemplatesOptions::new("acct").with_limit(0).validate().unwrap_err();
        assert!(err.message().contains("limit"));
    }

    #[test]
    fn version_lookup_requires_both_ids() {
        assert!(GetPolicyTemplateVersionOptions::new("t1", "").validate().is_err());
        assert!(GetPolicyTemplateVersionOptions::new("t1", "2").validate().is_ok());
    }
}
