//! Role operations

use std::collections::HashMap;

use ibmcloud_common::{SdkResult, Validate, ValidationError};

use crate::models::PolicyType;

/// Options for `list_roles`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRolesOptions {
    pub accept_language: Option<String>,
    pub account_id: Option<String>,
    pub service_name: Option<String>,
    /// Source service of an authorization policy, e.g. `kms`.
    pub source_service_name: Option<String>,
    pub policy_type: Option<PolicyType>,
    pub service_group_id: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ListRolesOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

optional_setters!(ListRolesOptions {
    with_accept_language => accept_language: String,
    with_account_id => account_id: String,
    with_service_name => service_name: String,
    with_source_service_name => source_service_name: String,
    with_policy_type => policy_type: PolicyType,
    with_service_group_id => service_group_id: String,
});

impl Validate for ListRolesOptions {
    fn validate(&self) -> SdkResult<()> {
        Ok(())
    }
}

/// Options for `create_role`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleOptions {
    pub display_name: String,
    pub actions: Vec<String>,
    /// Alphanumeric, starting with a capital letter.
    pub name: String,
    pub account_id: String,
    pub service_name: String,
    pub description: Option<String>,
    pub accept_language: Option<String>,
    pub headers: HashMap<String, String>,
}

impl CreateRoleOptions {
    pub fn new(
        display_name: impl Into<String>,
        actions: Vec<String>,
        name: impl Into<String>,
        account_id: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            actions,
            name: name.into(),
            account_id: account_id.into(),
            service_name: service_name.into(),
            description: None,
            accept_language: None,
            headers: HashMap::new(),
        }
    }
}

optional_setters!(CreateRoleOptions {
    with_description => description: String,
    with_accept_language => accept_language: String,
});

impl Validate for CreateRoleOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("display_name", &self.display_name);
        errors.require("actions", &self.actions);
        errors.require("name", &self.name);
        errors.require("account_id", &self.account_id);
        errors.require("service_name", &self.service_name);
        errors.into_result()
    }
}

/// Options for `replace_role`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceRoleOptions {
    pub role_id: String,
    pub if_match: String,
    pub display_name: String,
    pub actions: Vec<String>,
    pub description: Option<String>,
    pub headers: HashMap<String, String>,
}

impl ReplaceRoleOptions {
    pub fn new(
        role_id: impl Into<String>,
        if_match: impl Into<String>,
        display_name: impl Into<String>,
        actions: Vec<String>,
    ) -> Self {
        Self {
            role_id: role_id.into(),
            if_match: if_match.into(),
            display_name: display_name.into(),
            actions,
            description: None,
            headers: HashMap::new(),
        }
    }
}

optional_setters!(ReplaceRoleOptions {
    with_description => description: String,
});

impl Validate for ReplaceRoleOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("role_id", &self.role_id);
        errors.require("if_match", &self.if_match);
        errors.require("display_name", &self.display_name);
        errors.require("actions", &self.actions);
        errors.into_result()
    }
}

/// Options for `get_role`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRoleOptions {
    pub role_id: String,
    pub headers: HashMap<String, String>,
}

impl GetRoleOptions {
    pub fn new(role_id: impl Into<String>) -> Self {
        Self { role_id: role_id.into(), headers: HashMap::new() }
    }
}

optional_setters!(GetRoleOptions {});

impl Validate for GetRoleOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("role_id", &self.role_id);
        errors.into_result()
    }
}

/// Options for `delete_role`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRoleOptions {
    pub role_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteRoleOptions {
    pub fn new(role_id: impl Into<String>) -> Self {
        Self { role_id: role_id.into(), headers: HashMap::new() }
    }
}

optional_setters!(DeleteRoleOptions {});

impl Validate for DeleteRoleOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("role_id", &self.role_id);
        errors.into_result()
    }
}
