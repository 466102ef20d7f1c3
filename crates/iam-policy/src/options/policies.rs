//! v1 policy operations

use std::collections::HashMap;

use ibmcloud_common::{SdkResult, Validate, ValidationError};

use crate::models::{
    PolicyFormat, PolicyResource, PolicyRole, PolicySort, PolicyState, PolicySubject, PolicyType,
    ServiceType,
};

/// Options for `list_policies`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPoliciesOptions {
    pub account_id: String,
    /// Language of role display names, e.g. `default` or `fr`.
    pub accept_language: Option<String>,
    pub iam_id: Option<String>,
    pub access_group_id: Option<String>,
    pub policy_type: Option<PolicyType>,
    pub service_type: Option<ServiceType>,
    pub tag_name: Option<String>,
    pub tag_value: Option<String>,
    pub sort: Option<PolicySort>,
    pub format: Option<PolicyFormat>,
    pub state: Option<PolicyState>,
    pub headers: HashMap<String, String>,
}

impl ListPoliciesOptions {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            accept_language: None,
            iam_id: None,
            access_group_id: None,
            policy_type: None,
            service_type: None,
            tag_name: None,
            tag_value: None,
            sort: None,
            format: None,
            state: None,
            headers: HashMap::new(),
        }
    }
}

optional_setters!(ListPoliciesOptions {
    with_accept_language => accept_language: String,
    with_iam_id => iam_id: String,
    with_access_group_id => access_group_id: String,
    with_type => policy_type: PolicyType,
    with_service_type => service_type: ServiceType,
    with_tag_name => tag_name: String,
    with_tag_value => tag_value: String,
    with_sort => sort: PolicySort,
    with_format => format: PolicyFormat,
    with_state => state: PolicyState,
});

impl Validate for ListPoliciesOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("account_id", &self.account_id);
        errors.into_result()
    }
}

/// Options for `create_policy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePolicyOptions {
    pub policy_type: PolicyType,
    pub subjects: Vec<PolicySubject>,
    pub roles: Vec<PolicyRole>,
    pub resources: Vec<PolicyResource>,
    pub description: Option<String>,
    pub accept_language: Option<String>,
    pub headers: HashMap<String, String>,
}

impl CreatePolicyOptions {
    pub fn new(
        policy_type: impl Into<PolicyType>,
        subjects: Vec<PolicySubject>,
        roles: Vec<PolicyRole>,
        resources: Vec<PolicyResource>,
    ) -> Self {
        Self {
            policy_type: policy_type.into(),
            subjects,
            roles,
            resources,
            description: None,
            accept_language: None,
            headers: HashMap::new(),
        }
    }
}

optional_setters!(CreatePolicyOptions {
    with_description => description: String,
    with_accept_language => accept_language: String,
});

impl Validate for CreatePolicyOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("type", self.policy_type.as_str());
        errors.require("subjects", &self.subjects);
        errors.require("roles", &self.roles);
        errors.require("resources", &self.resources);
        errors.into_result()
    }
}

/// Options for `replace_policy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacePolicyOptions {
    pub policy_id: String,
    /// ETag of the policy being replaced.
    pub if_match: String,
    pub policy_type: PolicyType,
    pub subjects: Vec<PolicySubject>,
    pub roles: Vec<PolicyRole>,
    pub resources: Vec<PolicyResource>,
    pub description: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ReplacePolicyOptions {
    pub fn new(
        policy_id: impl Into<String>,
        if_match: impl Into<String>,
        policy_type: impl Into<PolicyType>,
        subjects: Vec<PolicySubject>,
        roles: Vec<PolicyRole>,
        resources: Vec<PolicyResource>,
    ) -> Self {
        Self {
            policy_id: policy_id.into(),
            if_match: if_match.into(),
            policy_type: policy_type.into(),
            subjects,
            roles,
            resources,
            description: None,
            headers: HashMap::new(),
        }
    }
}

optional_setters!(ReplacePolicyOptions {
    with_description => description: String,
});

impl Validate for ReplacePolicyOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("policy_id", &self.policy_id);
        errors.require("if_match", &self.if_match);
        errors.require("type", self.policy_type.as_str());
        errors.require("subjects", &self.subjects);
        errors.require("roles", &self.roles);
        errors.require("resources", &self.resources);
        errors.into_result()
    }
}

/// Options for `get_policy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPolicyOptions {
    pub policy_id: String,
    pub headers: HashMap<String, String>,
}

impl GetPolicyOptions {
    pub fn new(policy_id: impl Into<String>) -> Self {
        Self { policy_id: policy_id.into(), headers: HashMap::new() }
    }
}

optional_setters!(GetPolicyOptions {});

impl Validate for GetPolicyOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("policy_id", &self.policy_id);
        errors.into_result()
    }
}

/// Options for `delete_policy`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePolicyOptions {
    pub policy_id: String,
    pub headers: HashMap<String, String>,
}

impl DeletePolicyOptions {
    pub fn new(policy_id: impl Into<String>) -> Self {
        Self { policy_id: policy_id.into(), headers: HashMap::new() }
    }
}

optional_setters!(DeletePolicyOptions {});

impl Validate for DeletePolicyOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("policy_id", &self.policy_id);
        errors.into_result()
    }
}

/// Options for `update_policy_state`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePolicyStateOptions {
    pub policy_id: String,
    pub if_match: String,
    pub state: Option<PolicyState>,
    pub headers: HashMap<String, String>,
}

impl UpdatePolicyStateOptions {
    pub fn new(policy_id: impl Into<String>, if_match: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            if_match: if_match.into(),
            state: None,
            headers: HashMap::new(),
        }
    }
}

optional_setters!(UpdatePolicyStateOptions {
    with_state => state: PolicyState,
});

impl Validate for UpdatePolicyStateOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("policy_id", &self.policy_id);
        errors.require("if_match", &self.if_match);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_every_collection() {
        let options = CreatePolicyOptions::new(PolicyType::Access, Vec::new(), Vec::new(), Vec::new());
        let err = options.validate().unwrap_err();
        for field in ["subjects", "roles", "resources"] {
            assert!(err.message().contains(field), "{field}");
        }
    }

    #[test]
    fn setters_accept_plain_strings() {
        let options = ListPoliciesOptions::new("acct")
            .with_type("access")
            .with_sort("-last_modified_at")
            .with_state(PolicyState::Active);
        assert_eq!(options.policy_type, Some(PolicyType::Access));
        assert_eq!(options.sort.as_ref().map(PolicySort::as_str), Some("-last_modified_at"));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn replace_requires_etag() {
        let options = UpdatePolicyStateOptions::new("policy-1", "");
        assert!(options.validate().unwrap_err().message().contains("if_match"));
    }
}
