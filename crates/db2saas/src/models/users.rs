//! Database users

use std::collections::HashMap;

use ibmcloud_common::{string_enum, SdkResult, ValidationError};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Role of a database user
    pub enum UserRole {
        Bluadmin => "bluadmin",
        Bluuser => "bluuser",
    }
}

string_enum! {
    /// Whether a user account is locked
    pub enum UserLocked {
        Yes => "yes",
        No => "no",
    }
}

/// How a user authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAuthentication {
    /// Authentication method.
    pub method: String,
    /// Password policy id.
    pub policy_id: String,
}

impl UserAuthentication {
    /// # Errors
    /// `struct-validation-error` when either value is empty.
    pub fn new(method: impl Into<String>, policy_id: impl Into<String>) -> SdkResult<Self> {
        let auth = Self { method: method.into(), policy_id: policy_id.into() };
        let mut errors = ValidationError::new();
        errors.require("method", &auth.method);
        errors.require("policy_id", &auth.policy_id);
        errors.into_result()?;
        Ok(auth)
    }
}

/// A user as returned after creation or lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessUserResponse {
    #[serde(rename = "dvRole")]
    pub dv_role: String,
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(rename = "formatedIbmid")]
    pub formated_ibmid: String,
    pub role: UserRole,
    pub iamid: String,
    #[serde(rename = "permittedActions")]
    pub permitted_actions: Vec<String>,
    #[serde(rename = "allClean")]
    pub all_clean: bool,
    pub password: String,
    pub iam: bool,
    pub name: String,
    pub ibmid: String,
    pub id: String,
    pub locked: UserLocked,
    #[serde(rename = "initErrorMsg")]
    pub init_error_msg: String,
    pub email: String,
    pub authentication: UserAuthentication,
}

/// Response of `getbyid_db2_saas_user`; same shape as a created user.
pub type SuccessGetUserByID = SuccessUserResponse;

/// All users of a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessGetUserInfo {
    pub count: i64,
    pub resources: Vec<SuccessGetUserInfoResourcesItem>,
}

/// One user in a listing; the service may omit any field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessGetUserInfoResourcesItem {
    #[serde(rename = "dvRole", default, skip_serializing_if = "Option::is_none")]
    pub dv_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
    #[serde(rename = "formatedIbmid", default, skip_serializing_if = "Option::is_none")]
    pub formated_ibmid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iamid: Option<String>,
    #[serde(rename = "permittedActions", default, skip_serializing_if = "Option::is_none")]
    pub permitted_actions: Option<Vec<String>>,
    #[serde(rename = "allClean", default, skip_serializing_if = "Option::is_none")]
    pub all_clean: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ibmid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<UserLocked>,
    #[serde(rename = "initErrorMsg", default, skip_serializing_if = "Option::is_none")]
    pub init_error_msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<UserAuthentication>,
}
