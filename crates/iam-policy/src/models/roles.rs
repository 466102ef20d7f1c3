//! System, service and custom roles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A system or service defined role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
}

/// An account-defined role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRole {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    /// Name used in the role CRN; alphanumeric, starting with a capital letter.
    pub name: String,
    pub account_id: String,
    pub service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Roles available in an account, grouped by origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleList {
    #[serde(default)]
    pub custom_roles: Vec<CustomRole>,
    #[serde(default)]
    pub service_roles: Vec<Role>,
    #[serde(default)]
    pub system_roles: Vec<Role>,
}

impl RoleList {
    /// Every role's display name, custom roles first.
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.custom_roles
            .iter()
            .map(|role| role.display_name.as_str())
            .chain(self.service_roles.iter().map(|role| role.display_name.as_str()))
            .chain(self.system_roles.iter().map(|role| role.display_name.as_str()))
    }
}

/// An action a role permits, as listed in enriched grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAction {
    pub id: String,
    pub display_name: String,
    pub description: String,
}
