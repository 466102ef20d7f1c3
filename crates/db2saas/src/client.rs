//! The Db2 SaaS client
//!
//! [`Db2saasV1`] wraps a [`BaseService`] and exposes one async method per
//! API operation. Each method validates its options, builds the request,
//! sends it and decodes the typed result. Every error carries this crate's
//! [`component_info`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use ibmcloud_common::{codes, ErrorKind, SdkError, SdkResult, Validate};
use ibmcloud_core::{
    get_authenticator_from_environment, Authenticator, BaseService, DetailedResponse, Method,
    RequestBuilder, ServiceOptions,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use crate::models::{
    AllowPlanLimit, AutoScalingEnabled, CustomSettingsDb, CustomSettingsDbm,
    CustomSettingsRegistry, IpAddress, SuccessAutoScaling, SuccessConnectionInfo,
    SuccessCreateBackup, SuccessGetAllowlistIPs, SuccessGetBackups, SuccessGetUserByID,
    SuccessGetUserInfo, SuccessPostAllowedlistIPs, SuccessPostCustomSettings,
    SuccessTuneableParams, SuccessUpdateAutoScale, SuccessUserResponse, UserAuthentication,
    UserLocked, UserRole,
};
use crate::options::{
    DeleteDb2SaasUserOptions, GetDb2SaasAllowlistOptions, GetDb2SaasAutoscaleOptions,
    GetDb2SaasBackupOptions, GetDb2SaasConnectionInfoOptions, GetDb2SaasTuneableParamOptions,
    GetDb2SaasUserOptions, GetbyidDb2SaasUserOptions, PostDb2SaasAllowlistOptions,
    PostDb2SaasBackupOptions, PostDb2SaasDbConfigurationOptions, PostDb2SaasUserOptions,
    PutDb2SaasAutoscaleOptions,
};
use crate::{
    component_info, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL, PARAMETERIZED_SERVICE_URL,
    SDK_SERVICE_NAME, SDK_SERVICE_VERSION,
};

const DEPLOYMENT_ID_HEADER: &str = "x-deployment-id";
const DB_PROFILE_HEADER: &str = "x-db-profile";

/// Construction settings for [`Db2saasV1`]
#[derive(Debug, Clone, Default)]
pub struct Db2saasV1Options {
    /// Overrides [`DEFAULT_SERVICE_URL`].
    pub url: Option<String>,
    /// Overrides [`DEFAULT_SERVICE_NAME`] for external configuration.
    pub service_name: Option<String>,
    /// Required by [`Db2saasV1::new`]; loaded from the environment by
    /// [`Db2saasV1::new_using_external_config`] when absent.
    pub authenticator: Option<Arc<dyn Authenticator>>,
}

impl Db2saasV1Options {
    /// Options carrying `authenticator`.
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator: Some(authenticator), ..Self::default() }
    }

    /// Set [`Self::url`].
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set [`Self::service_name`].
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }
}

/// Client for the Db2 SaaS admin API
///
/// Clones share the authenticator; clone before changing the URL, headers,
/// gzip or retry settings of a client used by other tasks.
#[derive(Debug, Clone)]
pub struct Db2saasV1 {
    service: BaseService,
}

impl Db2saasV1 {
    /// Build a client from external configuration named by
    /// `options.service_name` (default `db2saas`).
    ///
    /// # Errors
    /// - `env-auth-error`: no authenticator could be built from the environment
    /// - `new-client-error`: the client could not be constructed
    /// - `client-config-error`: the external settings are invalid
    /// - `url-set-error`: `options.url` is invalid
    pub fn new_using_external_config(options: Db2saasV1Options) -> SdkResult<Self> {
        let service_name =
            options.service_name.clone().unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        let authenticator = match options.authenticator {
            Some(authenticator) => authenticator,
            None => get_authenticator_from_environment(&service_name)
                .map_err(|err| in_component(err.with_code(codes::ENV_AUTH_ERROR)))?,
        };

        let mut client = Self::new(Db2saasV1Options {
            url: None,
            service_name: Some(service_name.clone()),
            authenticator: Some(authenticator),
        })
        .map_err(|err| err.with_code(codes::NEW_CLIENT_ERROR))?;

        client
            .service
            .configure_service(&service_name)
            .map_err(|err| in_component(err.with_code(codes::CLIENT_CONFIG_ERROR)))?;

        if let Some(url) = &options.url {
            client.set_service_url(url).map_err(|err| err.with_code(codes::URL_SET_ERROR))?;
        }

        Ok(client)
    }

    /// # Errors
    /// `new-base-error` when no authenticator is given or it is invalid;
    /// `set-url-error` when `options.url` is invalid.
    pub fn new(options: Db2saasV1Options) -> SdkResult<Self> {
        let authenticator = options.authenticator.ok_or_else(|| {
            in_component(SdkError::new(
                ErrorKind::Configuration,
                codes::NEW_BASE_ERROR,
                "an authenticator is required",
            ))
        })?;

        let service = BaseService::new(
            ServiceOptions::new(authenticator)
                .with_url(DEFAULT_SERVICE_URL)
                .with_service_name(
                    options.service_name.unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
                ),
        )
        .map_err(in_component)?;

        let mut client = Self { service };
        if let Some(url) = &options.url {
            client.set_service_url(url)?;
        }
        Ok(client)
    }

    /// This API has no regional endpoints.
    ///
    /// # Errors
    /// Always `no-regional-support`.
    pub fn service_url_for_region(region: &str) -> SdkResult<String> {
        Err(in_component(SdkError::new(
            ErrorKind::Url,
            codes::NO_REGIONAL_SUPPORT,
            format!("service does not support regional URLs (requested '{region}')"),
        )))
    }

    /// Fill [`PARAMETERIZED_SERVICE_URL`]; `region` defaults to `us-south`.
    ///
    /// # Errors
    /// `url-resolve-error` for variables the template does not define.
    pub fn construct_service_url(variables: &HashMap<String, String>) -> SdkResult<String> {
        ibmcloud_core::construct_service_url(
            PARAMETERIZED_SERVICE_URL,
            &[("region", "us-south")],
            variables,
        )
        .map_err(in_component)
    }

    /// # Errors
    /// `set-url-error` for an empty, templated or unparsable URL.
    pub fn set_service_url(&mut self, url: &str) -> SdkResult<()> {
        self.service.set_service_url(url).map_err(in_component)
    }

    /// Current base URL.
    pub fn service_url(&self) -> &str {
        self.service.service_url()
    }

    /// Headers added to every request.
    ///
    /// # Errors
    /// `build-error` when a header is not valid HTTP.
    pub fn set_default_headers(&mut self, headers: &HashMap<String, String>) -> SdkResult<()> {
        self.service.set_default_headers(headers).map_err(in_component)
    }

    /// Toggle gzip for request bodies.
    pub fn set_enable_gzip_compression(&mut self, enabled: bool) {
        self.service.set_enable_gzip_compression(enabled);
    }

    /// True when request bodies are gzipped.
    pub fn enable_gzip_compression(&self) -> bool {
        self.service.enable_gzip_compression()
    }

    /// Retry 429 and 5xx responses with capped exponential backoff.
    pub fn enable_retries(&mut self, max_retries: usize, max_retry_interval: Duration) {
        self.service.enable_retries(max_retries, max_retry_interval);
    }

    /// Turn retries off.
    pub fn disable_retries(&mut self) {
        self.service.disable_retries();
    }

    /// Connection details of a deployment.
    #[instrument(skip_all, fields(operation_id = "get_db2_saas_connection_info"))]
    pub async fn get_db2_saas_connection_info(
        &self,
        options: &GetDb2SaasConnectionInfoOptions,
    ) -> SdkResult<DetailedResponse<SuccessConnectionInfo>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::GET,
            "/connectioninfo/{deployment_id}",
            &[("deployment_id", options.deployment_id.as_str())],
            &options.headers,
            "GetDb2SaasConnectionInfo",
        )?;
        builder.add_header(DEPLOYMENT_ID_HEADER, options.x_deployment_id.as_str());
        self.send(&builder, "get_db2_saas_connection_info").await
    }

    /// Replace the IP allowlist.
    #[instrument(skip_all, fields(operation_id = "post_db2_saas_allowlist"))]
    pub async fn post_db2_saas_allowlist(
        &self,
        options: &PostDb2SaasAllowlistOptions,
    ) -> SdkResult<DetailedResponse<SuccessPostAllowedlistIPs>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::POST,
            "/dbsettings/whitelistips",
            &[],
            &options.headers,
            "PostDb2SaasAllowlist",
        )?;
        set_json_body(&mut builder, &AllowlistBody { ip_addresses: &options.ip_addresses })?;
        builder.add_header(DEPLOYMENT_ID_HEADER, options.x_deployment_id.as_str());
        self.send(&builder, "post_db2_saas_allowlist").await
    }

    /// The IP allowlist.
    #[instrument(skip_all, fields(operation_id = "get_db2_saas_allowlist"))]
    pub async fn get_db2_saas_allowlist(
        &self,
        options: &GetDb2SaasAllowlistOptions,
    ) -> SdkResult<DetailedResponse<SuccessGetAllowlistIPs>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::GET,
            "/dbsettings/whitelistips",
            &[],
            &options.headers,
            "GetDb2SaasAllowlist",
        )?;
        builder.add_header(DEPLOYMENT_ID_HEADER, options.x_deployment_id.as_str());
        self.send(&builder, "get_db2_saas_allowlist").await
    }

    /// Create a database user.
    #[instrument(skip_all, fields(operation_id = "post_db2_saas_user"))]
    pub async fn post_db2_saas_user(
        &self,
        options: &PostDb2SaasUserOptions,
    ) -> SdkResult<DetailedResponse<SuccessUserResponse>> {
        options.validate().map_err(in_component)?;
        let mut builder =
            self.prepare(Method::POST, "/users", &[], &options.headers, "PostDb2SaasUser")?;
        let body = CreateUserBody {
            id: &options.id,
            iam: options.iam,
            ibmid: &options.ibmid,
            name: &options.name,
            password: &options.password,
            role: &options.role,
            email: &options.email,
            locked: &options.locked,
            authentication: &options.authentication,
        };
        set_json_body(&mut builder, &body)?;
        builder.add_header(DEPLOYMENT_ID_HEADER, options.x_deployment_id.as_str());
        self.send(&builder, "post_db2_saas_user").await
    }

    /// All users of a deployment.
    #[instrument(skip_all, fields(operation_id = "get_db2_saas_user"))]
    pub async fn get_db2_saas_user(
        &self,
        options: &GetDb2SaasUserOptions,
    ) -> SdkResult<DetailedResponse<SuccessGetUserInfo>> {
        options.validate().map_err(in_component)?;
        let mut builder =
            self.prepare(Method::GET, "/users", &[], &options.headers, "GetDb2SaasUser")?;
        builder.add_header(DEPLOYMENT_ID_HEADER, options.x_deployment_id.as_str());
        self.send(&builder, "get_db2_saas_user").await
    }

    /// Delete a user; the service answers with a free-form JSON object.
    #[instrument(skip_all, fields(operation_id = "delete_db2_saas_user"))]
    pub async fn delete_db2_saas_user(
        &self,
        options: &DeleteDb2SaasUserOptions,
    ) -> SdkResult<DetailedResponse<HashMap<String, serde_json::Value>>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::DELETE,
            "/users/{id}",
            &[("id", options.id.as_str())],
            &options.headers,
            "DeleteDb2SaasUser",
        )?;
        builder.add_header(DEPLOYMENT_ID_HEADER, options.x_deployment_id.as_str());
        self.send(&builder, "delete_db2_saas_user").await
    }

    /// The `bluadmin` user of a deployment.
    #[instrument(skip_all, fields(operation_id = "getbyid_db2_saas_user"))]
    pub async fn getbyid_db2_saas_user(
        &self,
        options: &GetbyidDb2SaasUserOptions,
    ) -> SdkResult<DetailedResponse<SuccessGetUserByID>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::GET,
            "/users/bluadmin",
            &[],
            &options.headers,
            "GetbyidDb2SaasUser",
        )?;
        builder.add_header(DEPLOYMENT_ID_HEADER, options.x_deployment_id.as_str());
        self.send(&builder, "getbyid_db2_saas_user").await
    }

    /// Update autoscaling; only the settings present in `options` are sent.
    #[instrument(skip_all, fields(operation_id = "put_db2_saas_autoscale"))]
    pub async fn put_db2_saas_autoscale(
        &self,
        options: &PutDb2SaasAutoscaleOptions,
    ) -> SdkResult<DetailedResponse<SuccessUpdateAutoScale>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::PUT,
            "/manage/scaling/auto",
            &[],
            &options.headers,
            "PutDb2SaasAutoscale",
        )?;
        let body = AutoscaleBody {
            auto_scaling_enabled: options.auto_scaling_enabled.as_ref(),
            auto_scaling_threshold: options.auto_scaling_threshold,
            auto_scaling_over_time_period: options.auto_scaling_over_time_period,
            auto_scaling_pause_limit: options.auto_scaling_pause_limit,
            auto_scaling_allow_plan_limit: options.auto_scaling_allow_plan_limit.as_ref(),
        };
        set_json_body(&mut builder, &body)?;
        builder.add_header(DB_PROFILE_HEADER, options.x_db_profile.as_str());
        self.send(&builder, "put_db2_saas_autoscale").await
    }

    /// Current autoscaling configuration.
    #[instrument(skip_all, fields(operation_id = "get_db2_saas_autoscale"))]
    pub async fn get_db2_saas_autoscale(
        &self,
        options: &GetDb2SaasAutoscaleOptions,
    ) -> SdkResult<DetailedResponse<SuccessAutoScaling>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::GET,
            "/manage/scaling/auto",
            &[],
            &options.headers,
            "GetDb2SaasAutoscale",
        )?;
        builder.add_header(DB_PROFILE_HEADER, options.x_db_profile.as_str());
        self.send(&builder, "get_db2_saas_autoscale").await
    }

    /// Apply custom database, instance and registry settings.
    #[instrument(skip_all, fields(operation_id = "post_db2_saas_db_configuration"))]
    pub async fn post_db2_saas_db_configuration(
        &self,
        options: &PostDb2SaasDbConfigurationOptions,
    ) -> SdkResult<DetailedResponse<SuccessPostCustomSettings>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::POST,
            "/manage/deployments/custom_setting",
            &[],
            &options.headers,
            "PostDb2SaasDbConfiguration",
        )?;
        let body = CustomSettingsBody {
            registry: options.registry.as_ref(),
            db: options.db.as_ref(),
            dbm: options.dbm.as_ref(),
        };
        set_json_body(&mut builder, &body)?;
        builder.add_header(DB_PROFILE_HEADER, options.x_db_profile.as_str());
        self.send(&builder, "post_db2_saas_db_configuration").await
    }

    /// Settings that can be tuned on a deployment.
    #[instrument(skip_all, fields(operation_id = "get_db2_saas_tuneable_param"))]
    pub async fn get_db2_saas_tuneable_param(
        &self,
        options: &GetDb2SaasTuneableParamOptions,
    ) -> SdkResult<DetailedResponse<SuccessTuneableParams>> {
        options.validate().map_err(in_component)?;
        let builder = self.prepare(
            Method::GET,
            "/manage/tuneable_param",
            &[],
            &options.headers,
            "GetDb2SaasTuneableParam",
        )?;
        self.send(&builder, "get_db2_saas_tuneable_param").await
    }

    /// Backups of a deployment.
    #[instrument(skip_all, fields(operation_id = "get_db2_saas_backup"))]
    pub async fn get_db2_saas_backup(
        &self,
        options: &GetDb2SaasBackupOptions,
    ) -> SdkResult<DetailedResponse<SuccessGetBackups>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::GET,
            "/manage/backups",
            &[],
            &options.headers,
            "GetDb2SaasBackup",
        )?;
        builder.add_header(DB_PROFILE_HEADER, options.x_db_profile.as_str());
        self.send(&builder, "get_db2_saas_backup").await
    }

    /// Start an on-demand backup.
    #[instrument(skip_all, fields(operation_id = "post_db2_saas_backup"))]
    pub async fn post_db2_saas_backup(
        &self,
        options: &PostDb2SaasBackupOptions,
    ) -> SdkResult<DetailedResponse<SuccessCreateBackup>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::POST,
            "/manage/backups/backup",
            &[],
            &options.headers,
            "PostDb2SaasBackup",
        )?;
        builder.add_header(DB_PROFILE_HEADER, options.x_db_profile.as_str());
        self.send(&builder, "post_db2_saas_backup").await
    }

    /// Resolve the URL and apply caller, SDK and `Accept` headers, in that
    /// order.
    fn prepare(
        &self,
        method: Method,
        path: &str,
        path_params: &[(&str, &str)],
        headers: &HashMap<String, String>,
        sdk_operation: &str,
    ) -> SdkResult<RequestBuilder> {
        let mut builder = RequestBuilder::new(method);
        builder.enable_gzip(self.service.enable_gzip_compression());
        builder
            .resolve_request_url(self.service.service_url(), path, path_params)
            .map_err(in_component)?;
        builder.add_headers(headers);
        builder.add_sdk_headers(SDK_SERVICE_NAME, SDK_SERVICE_VERSION, sdk_operation);
        builder.add_header("Accept", "application/json");
        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: &RequestBuilder,
        operation_id: &str,
    ) -> SdkResult<DetailedResponse<T>> {
        let request = builder.build().map_err(in_component)?;
        let response = self.service.request(request, operation_id).await.map_err(in_component)?;
        response.into_detailed().map_err(in_component)
    }
}

fn set_json_body<B: Serialize>(builder: &mut RequestBuilder, body: &B) -> SdkResult<()> {
    builder.add_header("Content-Type", "application/json");
    builder.set_body_json(body).map_err(in_component)?;
    Ok(())
}

fn in_component(err: SdkError) -> SdkError {
    err.with_component(component_info())
}

#[derive(Serialize)]
struct AllowlistBody<'a> {
    ip_addresses: &'a [IpAddress],
}

#[derive(Serialize)]
struct CreateUserBody<'a> {
    id: &'a str,
    iam: bool,
    ibmid: &'a str,
    name: &'a str,
    password: &'a str,
    role: &'a UserRole,
    email: &'a str,
    locked: &'a UserLocked,
    authentication: &'a UserAuthentication,
}

#[derive(Serialize)]
struct AutoscaleBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_scaling_enabled: Option<&'a AutoScalingEnabled>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_scaling_threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_scaling_over_time_period: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_scaling_pause_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_scaling_allow_plan_limit: Option<&'a AllowPlanLimit>,
}

#[derive(Serialize)]
struct CustomSettingsBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    registry: Option<&'a CustomSettingsRegistry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    db: Option<&'a CustomSettingsDb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dbm: Option<&'a CustomSettingsDbm>,
}
