//! Policy templates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{PolicyTemplateState, PolicyType};
use super::rules::V2PolicyRule;
use super::v2::{Control, V2PolicyResource, V2PolicySubject};

/// One version of a policy template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Enterprise or account that owns the template.
    pub account_id: String,
    pub version: String,
    /// Committed versions can no longer be changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed: Option<bool>,
    pub policy: TemplatePolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PolicyTemplateState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
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
}

/// The policy a template stamps out; the subject is left to assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePolicy {
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<V2PolicyResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<V2PolicySubject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<V2PolicyRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Control>,
}

/// A page of policy templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyTemplateCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<PaginationLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PaginationLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<PaginationLink>,
    #[serde(default)]
    pub policy_templates: Vec<PolicyTemplate>,
}

impl PolicyTemplateCollection {
    /// Page token to pass as `start` for the next page, if any.
    pub fn next_start(&self) -> Option<&str> {
        self.next.as_ref().and_then(|link| link.start.as_deref())
    }
}

/// Link to another page of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Page token for the `start` query parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}
