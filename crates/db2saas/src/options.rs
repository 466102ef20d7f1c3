//! Parameters of each operation
//!
//! Every options struct is built with `new(required...)` and refined with
//! `with_*` setters. Required values are checked by [`Validate`] before a
//! request is built. `headers` is applied first, so the operation's own
//! headers win on conflict.

use std::collections::HashMap;
use std::fmt;

use ibmcloud_common::{SdkResult, Validate, ValidationError};

use crate::models::{
    AllowPlanLimit, AutoScalingEnabled, CustomSettingsDb, CustomSettingsDbm,
    CustomSettingsRegistry, IpAddress, UserAuthentication, UserLocked, UserRole,
};

/// Options for `get_db2_saas_connection_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDb2SaasConnectionInfoOptions {
    /// Encoded CRN of the deployment, used in the path.
    pub deployment_id: String,
    /// CRN of the deployment.
    pub x_deployment_id: String,
    pub headers: HashMap<String, String>,
}

impl GetDb2SaasConnectionInfoOptions {
    pub fn new(deployment_id: impl Into<String>, x_deployment_id: impl Into<String>) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            x_deployment_id: x_deployment_id.into(),
            headers: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for GetDb2SaasConnectionInfoOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("deployment_id", &self.deployment_id);
        errors.require("x_deployment_id", &self.x_deployment_id);
        errors.into_result()
    }
}

/// Options for `post_db2_saas_allowlist`
///
/// The list replaces the current allowlist; an empty list clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDb2SaasAllowlistOptions {
    pub x_deployment_id: String,
    pub ip_addresses: Vec<IpAddress>,
    pub headers: HashMap<String, String>,
}

impl PostDb2SaasAllowlistOptions {
    pub fn new(x_deployment_id: impl Into<String>, ip_addresses: Vec<IpAddress>) -> Self {
        Self { x_deployment_id: x_deployment_id.into(), ip_addresses, headers: HashMap::new() }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for PostDb2SaasAllowlistOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("x_deployment_id", &self.x_deployment_id);
        for (index, ip) in self.ip_addresses.iter().enumerate() {
            errors.require(&format!("ip_addresses[{index}].address"), &ip.address);
            errors.require(&format!("ip_addresses[{index}].description"), &ip.description);
        }
        errors.into_result()
    }
}

/// Options for `get_db2_saas_allowlist`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDb2SaasAllowlistOptions {
    pub x_deployment_id: String,
    pub headers: HashMap<String, String>,
}

impl GetDb2SaasAllowlistOptions {
    pub fn new(x_deployment_id: impl Into<String>) -> Self {
        Self { x_deployment_id: x_deployment_id.into(), headers: HashMap::new() }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for GetDb2SaasAllowlistOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("x_deployment_id", &self.x_deployment_id);
        errors.into_result()
    }
}

/// Options for `post_db2_saas_user`
#[derive(Clone, PartialEq, Eq)]
pub struct PostDb2SaasUserOptions {
    pub x_deployment_id: String,
    /// User id.
    pub id: String,
    /// Whether the user is an IAM user.
    pub iam: bool,
    pub ibmid: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
    pub email: String,
    pub locked: UserLocked,
    pub authentication: UserAuthentication,
    pub headers: HashMap<String, String>,
}

impl PostDb2SaasUserOptions {
    /// The account starts unlocked with the `bluuser` role; use the setters
    /// to change either.
    pub fn new(
        x_deployment_id: impl Into<String>,
        id: impl Into<String>,
        ibmid: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        authentication: UserAuthentication,
    ) -> Self {
        Self {
            x_deployment_id: x_deployment_id.into(),
            id: id.into(),
            iam: false,
            ibmid: ibmid.into(),
            name: name.into(),
            password: password.into(),
            role: UserRole::Bluuser,
            email: email.into(),
            locked: UserLocked::No,
            authentication,
            headers: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_iam(mut self, iam: bool) -> Self {
        self.iam = iam;
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<UserRole>) -> Self {
        self.role = role.into();
        self
    }

    #[must_use]
    pub fn with_locked(mut self, locked: impl Into<UserLocked>) -> Self {
        self.locked = locked.into();
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl fmt::Debug for PostDb2SaasUserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostDb2SaasUserOptions")
            .field("x_deployment_id", &self.x_deployment_id)
            .field("id", &self.id)
            .field("iam", &self.iam)
            .field("ibmid", &self.ibmid)
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("locked", &self.locked)
            .field("authentication", &self.authentication)
            .finish_non_exhaustive()
    }
}

impl Validate for PostDb2SaasUserOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("x_deployment_id", &self.x_deployment_id);
        errors.require("id", &self.id);
        errors.require("ibmid", &self.ibmid);
        errors.require("name", &self.name);
        errors.require("password", &self.password);
        errors.require("role", self.role.as_str());
        errors.require("email", &self.email);
        errors.require("locked", self.locked.as_str());
        errors.require("authentication.method", &self.authentication.method);
        errors.require("authentication.policy_id", &self.authentication.policy_id);
        errors.into_result()
    }
}

/// Options for `get_db2_saas_user`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDb2SaasUserOptions {
    pub x_deployment_id: String,
    pub headers: HashMap<String, String>,
}

impl GetDb2SaasUserOptions {
    pub fn new(x_deployment_id: impl Into<String>) -> Self {
        Self { x_deployment_id: x_deployment_id.into(), headers: HashMap::new() }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for GetDb2SaasUserOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("x_deployment_id", &self.x_deployment_id);
        errors.into_result()
    }
}

/// Options for `delete_db2_saas_user`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDb2SaasUserOptions {
    pub x_deployment_id: String,
    /// Id of the user to delete.
    pub id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteDb2SaasUserOptions {
    pub fn new(x_deployment_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self { x_deployment_id: x_deployment_id.into(), id: id.into(), headers: HashMap::new() }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for DeleteDb2SaasUserOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("x_deployment_id", &self.x_deployment_id);
        errors.require("id", &self.id);
        errors.into_result()
    }
}

/// Options for `getbyid_db2_saas_user`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetbyidDb2SaasUserOptions {
    pub x_deployment_id: String,
    pub headers: HashMap<String, String>,
}

impl GetbyidDb2SaasUserOptions {
    pub fn new(x_deployment_id: impl Into<String>) -> Self {
        Self { x_deployment_id: x_deployment_id.into(), headers: HashMap::new() }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for GetbyidDb2SaasUserOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("x_deployment_id", &self.x_deployment_id);
        errors.into_result()
    }
}

/// Options for `put_db2_saas_autoscale`
///
/// Only the settings that are set are sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PutDb2SaasAutoscaleOptions {
    /// Instance CRN, query-escaped.
    pub x_db_profile: String,
    pub auto_scaling_enabled: Option<AutoScalingEnabled>,
    /// Storage utilization percentage that triggers scaling.
    pub auto_scaling_threshold: Option<i64>,
    /// Minutes the threshold must be exceeded.
    pub auto_scaling_over_time_period: Option<f64>,
    /// Minutes to wait between scaling events.
    pub auto_scaling_pause_limit: Option<i64>,
    pub auto_scaling_allow_plan_limit: Option<AllowPlanLimit>,
    pub headers: HashMap<String, String>,
}

impl PutDb2SaasAutoscaleOptions {
    pub fn new(x_db_profile: impl Into<String>) -> Self {
        Self {
            x_db_profile: x_db_profile.into(),
            auto_scaling_enabled: None,
            auto_scaling_threshold: None,
            auto_scaling_over_time_period: None,
            auto_scaling_pause_limit: None,
            auto_scaling_allow_plan_limit: None,
            headers: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_auto_scaling_enabled(mut self, enabled: impl Into<AutoScalingEnabled>) -> Self {
        self.auto_scaling_enabled = Some(enabled.into());
        self
    }

    #[must_use]
    pub fn with_auto_scaling_threshold(mut self, threshold: i64) -> Self {
        self.auto_scaling_threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn with_auto_scaling_over_time_period(mut self, minutes: f64) -> Self {
        self.auto_scaling_over_time_period = Some(minutes);
        self
    }

    #[must_use]
    pub fn with_auto_scaling_pause_limit(mut self, minutes: i64) -> Self {
        self.auto_scaling_pause_limit = Some(minutes);
        self
    }

    #[must_use]
    pub fn with_auto_scaling_allow_plan_limit(mut self, allow: impl Into<AllowPlanLimit>) -> Self {
        self.auto_scaling_allow_plan_limit = Some(allow.into());
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for PutDb2SaasAutoscaleOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("x_db_profile", &self.x_db_profile);
        errors.into_result()
    }
}

/// Options for `get_db2_saas_autoscale`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDb2SaasAutoscaleOptions {
    pub x_db_profile: String,
    pub headers: HashMap<String, String>,
}

impl GetDb2SaasAutoscaleOptions {
    pub fn new(x_db_profile: impl Into<String>) -> Self {
        Self { x_db_profile: x_db_profile.into(), headers: HashMap::new() }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for GetDb2SaasAutoscaleOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("x_db_profile", &self.x_db_profile);
        errors.into_result()
    }
}

/// Options for `post_db2_saas_db_configuration`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDb2SaasDbConfigurationOptions {
    pub x_db_profile: String,
    pub registry: Option<CustomSettingsRegistry>,
    pub db: Option<CustomSettingsDb>,
    pub dbm: Option<CustomSettingsDbm>,
    pub headers: HashMap<String, String>,
}

impl PostDb2SaasDbConfigurationOptions {
    pub fn new(x_db_profile: impl Into<String>) -> Self {
        Self {
            x_db_profile: x_db_profile.into(),
            registry: None,
            db: None,
            dbm: None,
            headers: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: CustomSettingsRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn with_db(mut self, db: CustomSettingsDb) -> Self {
        self.db = Some(db);
        self
    }

    #[must_use]
    pub fn with_dbm(mut self, dbm: CustomSettingsDbm) -> Self {
        self.dbm = Some(dbm);
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for PostDb2SaasDbConfigurationOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("x_db_profile", &self.x_db_profile);
        errors.into_result()
    }
}

/// Options for `get_db2_saas_tuneable_param`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetDb2SaasTuneableParamOptions {
    pub headers: HashMap<String, String>,
}

impl GetDb2SaasTuneableParamOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for GetDb2SaasTuneableParamOptions {
    fn validate(&self) -> SdkResult<()> {
        Ok(())
    }
}

/// Options for `get_db2_saas_backup`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDb2SaasBackupOptions {
    pub x_db_profile: String,
    pub headers: HashMap<String, String>,
}

impl GetDb2SaasBackupOptions {
    pub fn new(x_db_profile: impl Into<String>) -> Self {
        Self { x_db_profile: x_db_profile.into(), headers: HashMap::new() }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for GetDb2SaasBackupOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("x_db_profile", &self.x_db_profile);
        errors.into_result()
    }
}

/// Options for `post_db2_saas_backup`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDb2SaasBackupOptions {
    pub x_db_profile: String,
    pub headers: HashMap<String, String>,
}

impl PostDb2SaasBackupOptions {
    pub fn new(x_db_profile: impl Into<String>) -> Self {
        Self { x_db_profile: x_db_profile.into(), headers: HashMap::new() }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl Validate for PostDb2SaasBackupOptions {
    fn validate(&self) -> SdkResult<()> {
        let mut errors = ValidationError::new();
        errors.require("x_db_profile", &self.x_db_profile);
        errors.into_result()
    }
}
