//! The IAM Policy Management client

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
    Control, CustomRole, Policy, PolicyList, PolicyResource, PolicyRole, PolicyState,
    PolicySubject, PolicyTemplate, PolicyTemplateCollection, PolicyType, RoleList, V2Policy,
    V2PolicyCollection, V2PolicyResource, V2PolicyRule, V2PolicySubject,
};
use crate::options::{
    CreatePolicyOptions, CreateRoleOptions, CreateV2PolicyOptions, DeletePolicyOptions,
    DeleteRoleOptions, DeleteV2PolicyOptions, GetPolicyOptions, GetPolicyTemplateOptions,
    GetPolicyTemplateVersionOptions, GetRoleOptions, GetV2PolicyOptions, ListPoliciesOptions,
    ListPolicyTemplatesOptions, ListRolesOptions, ListV2PoliciesOptions, ReplacePolicyOptions,
    ReplaceRoleOptions, ReplaceV2PolicyOptions, UpdatePolicyStateOptions,
};
use crate::{
    component_info, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL, SDK_SERVICE_NAME,
    SDK_SERVICE_VERSION,
};

const ACCEPT_LANGUAGE_HEADER: &str = "Accept-Language";
const IF_MATCH_HEADER: &str = "If-Match";

/// Construction settings for [`IamPolicyManagementV1`]
#[derive(Debug, Clone, Default)]
pub struct IamPolicyManagementV1Options {
    /// Base URL; defaults to the public endpoint.
    pub url: Option<String>,
    /// Prefix for external configuration lookups.
    pub service_name: Option<String>,
    /// Required.
    pub authenticator: Option<Arc<dyn Authenticator>>,
}

impl IamPolicyManagementV1Options {
    /// Options with `authenticator` and defaults elsewhere.
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator: Some(authenticator), ..Self::default() }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Override the configuration prefix.
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }
}

/// Client for the IAM Policy Management API
#[derive(Debug, Clone)]
pub struct IamPolicyManagementV1 {
    service: BaseService,
}

impl IamPolicyManagementV1 {
    /// Build a client from external configuration named by
    /// `options.service_name` (default `iam_policy_management`).
    ///
    /// # Errors
    /// `env-auth-error`, `new-client-error`, `client-config-error` or
    /// `url-set-error`, by the step that failed.
    pub fn new_using_external_config(options: IamPolicyManagementV1Options) -> SdkResult<Self> {
        let service_name =
            options.service_name.clone().unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        let authenticator = match options.authenticator {
            Some(authenticator) => authenticator,
            None => get_authenticator_from_environment(&service_name)
                .map_err(|err| in_component(err.with_code(codes::ENV_AUTH_ERROR)))?,
        };

        let mut client = Self::new(IamPolicyManagementV1Options {
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
    /// `new-base-error` without an authenticator; `set-url-error` for an
    /// invalid `options.url`.
    pub fn new(options: IamPolicyManagementV1Options) -> SdkResult<Self> {
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

    /// # Errors
    /// Always `no-regional-support`.
    pub fn service_url_for_region(region: &str) -> SdkResult<String> {
        Err(in_component(SdkError::new(
            ErrorKind::Url,
            codes::NO_REGIONAL_SUPPORT,
            format!("service does not support regional URLs (requested '{region}')"),
        )))
    }

    /// # Errors
    /// `set-url-error` for an empty, templated or unparsable URL.
    pub fn set_service_url(&mut self, url: &str) -> SdkResult<()> {
        self.service.set_service_url(url).map_err(in_component)
    }

    /// Base URL requests are resolved against.
    pub fn service_url(&self) -> &str {
        self.service.service_url()
    }

    /// Replace the headers sent with every request.
    ///
    /// # Errors
    /// `build-error` when a header is not valid HTTP.
    pub fn set_default_headers(&mut self, headers: &HashMap<String, String>) -> SdkResult<()> {
        self.service.set_default_headers(headers).map_err(in_component)
    }

    /// Gzip request bodies before sending.
    pub fn set_enable_gzip_compression(&mut self, enabled: bool) {
        self.service.set_enable_gzip_compression(enabled);
    }

    /// Whether request bodies are gzipped.
    pub fn enable_gzip_compression(&self) -> bool {
        self.service.enable_gzip_compression()
    }

    /// Retry transient failures up to `max_retries` times, waiting at most
    /// `max_retry_interval` between attempts.
    pub fn enable_retries(&mut self, max_retries: usize, max_retry_interval: Duration) {
        self.service.enable_retries(max_retries, max_retry_interval);
    }

    /// Send every request once.
    pub fn disable_retries(&mut self) {
        self.service.disable_retries();
    }

    /// Policies of an account, filtered by the options' query values.
    #[instrument(skip_all, fields(operation_id = "list_policies"))]
    pub async fn list_policies(
        &self,
        options: &ListPoliciesOptions,
    ) -> SdkResult<DetailedResponse<PolicyList>> {
        options.validate().map_err(in_component)?;
        let mut builder =
            self.prepare(Method::GET, "/v1/policies", &[], &options.headers, "ListPolicies")?;
        builder
            .add_optional_header(ACCEPT_LANGUAGE_HEADER, options.accept_language.as_deref())
            .add_query("account_id", options.account_id.as_str())
            .add_optional_query("iam_id", options.iam_id.as_deref())
            .add_optional_query("access_group_id", options.access_group_id.as_deref())
            .add_optional_query("type", options.policy_type.as_ref().map(PolicyType::as_str))
            .add_optional_query("service_type", options.service_type.as_ref().map(|t| t.as_str()))
            .add_optional_query("tag_name", options.tag_name.as_deref())
            .add_optional_query("tag_value", options.tag_value.as_deref())
            .add_optional_query("sort", options.sort.as_ref().map(|s| s.as_str()))
            .add_optional_query("format", options.format.as_ref().map(|f| f.as_str()))
            .add_optional_query("state", options.state.as_ref().map(PolicyState::as_str));
        self.send(&builder, "list_policies").await
    }

    /// Create an access or authorization policy.
    #[instrument(skip_all, fields(operation_id = "create_policy"))]
    pub async fn create_policy(
        &self,
        options: &CreatePolicyOptions,
    ) -> SdkResult<DetailedResponse<Policy>> {
        options.validate().map_err(in_component)?;
        let mut builder =
            self.prepare(Method::POST, "/v1/policies", &[], &options.headers, "CreatePolicy")?;
        let body = PolicyBody {
            policy_type: &options.policy_type,
            subjects: &options.subjects,
            roles: &options.roles,
            resources: &options.resources,
            description: options.description.as_deref(),
        };
        set_json_body(&mut builder, &body)?;
        builder.add_optional_header(ACCEPT_LANGUAGE_HEADER, options.accept_language.as_deref());
        self.send(&builder, "create_policy").await
    }

    /// Replace a policy; `if_match` is the ETag of the last read.
    #[instrument(skip_all, fields(operation_id = "replace_policy"))]
    pub async fn replace_policy(
        &self,
        options: &ReplacePolicyOptions,
    ) -> SdkResult<DetailedResponse<Policy>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::PUT,
            "/v1/policies/{policy_id}",
            &[("policy_id", options.policy_id.as_str())],
            &options.headers,
            "ReplacePolicy",
        )?;
        let body = PolicyBody {
            policy_type: &options.policy_type,
            subjects: &options.subjects,
            roles: &options.roles,
            resources: &options.resources,
            description: options.description.as_deref(),
        };
        set_json_body(&mut builder, &body)?;
        builder.add_header(IF_MATCH_HEADER, options.if_match.as_str());
        self.send(&builder, "replace_policy").await
    }

    /// Policy by ID, with its ETag.
    #[instrument(skip_all, fields(operation_id = "get_policy"))]
    pub async fn get_policy(
        &self,
        options: &GetPolicyOptions,
    ) -> SdkResult<DetailedResponse<Policy>> {
        options.validate().map_err(in_component)?;
        let builder = self.prepare(
            Method::GET,
            "/v1/policies/{policy_id}",
            &[("policy_id", options.policy_id.as_str())],
            &options.headers,
            "GetPolicy",
        )?;
        self.send(&builder, "get_policy").await
    }

    /// Delete a policy by ID.
    #[instrument(skip_all, fields(operation_id = "delete_policy"))]
    pub async fn delete_policy(
        &self,
        options: &DeletePolicyOptions,
    ) -> SdkResult<DetailedResponse<()>> {
        options.validate().map_err(in_component)?;
        let builder = self.prepare(
            Method::DELETE,
            "/v1/policies/{policy_id}",
            &[("policy_id", options.policy_id.as_str())],
            &options.headers,
            "DeletePolicy",
        )?;
        self.send_empty(&builder, "delete_policy").await
    }

    /// Mark a policy active or deleted.
    #[instrument(skip_all, fields(operation_id = "update_policy_state"))]
    pub async fn update_policy_state(
        &self,
        options: &UpdatePolicyStateOptions,
    ) -> SdkResult<DetailedResponse<Policy>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::PATCH,
            "/v1/policies/{policy_id}",
            &[("policy_id", options.policy_id.as_str())],
            &options.headers,
            "UpdatePolicyState",
        )?;
        set_json_body(&mut builder, &StateBody { state: options.state.as_ref() })?;
        builder.add_header(IF_MATCH_HEADER, options.if_match.as_str());
        self.send(&builder, "update_policy_state").await
    }

    /// Custom, service and system roles visible to the caller.
    #[instrument(skip_all, fields(operation_id = "list_roles"))]
    pub async fn list_roles(
        &self,
        options: &ListRolesOptions,
    ) -> SdkResult<DetailedResponse<RoleList>> {
        options.validate().map_err(in_component)?;
        let mut builder =
            self.prepare(Method::GET, "/v2/roles", &[], &options.headers, "ListRoles")?;
        builder
            .add_optional_header(ACCEPT_LANGUAGE_HEADER, options.accept_language.as_deref())
            .add_optional_query("account_id", options.account_id.as_deref())
            .add_optional_query("service_name", options.service_name.as_deref())
            .add_optional_query("source_service_name", options.source_service_name.as_deref())
            .add_optional_query("policy_type", options.policy_type.as_ref().map(PolicyType::as_str))
            .add_optional_query("service_group_id", options.service_group_id.as_deref());
        self.send(&builder, "list_roles").await
    }

    /// Create a custom role in an account.
    #[instrument(skip_all, fields(operation_id = "create_role"))]
    pub async fn create_role(
        &self,
        options: &CreateRoleOptions,
    ) -> SdkResult<DetailedResponse<CustomRole>> {
        options.validate().map_err(in_component)?;
        let mut builder =
            self.prepare(Method::POST, "/v2/roles", &[], &options.headers, "CreateRole")?;
        let body = CreateRoleBody {
            display_name: &options.display_name,
            actions: &options.actions,
            name: &options.name,
            account_id: &options.account_id,
            service_name: &options.service_name,
            description: options.description.as_deref(),
        };
        set_json_body(&mut builder, &body)?;
        builder.add_optional_header(ACCEPT_LANGUAGE_HEADER, options.accept_language.as_deref());
        self.send(&builder, "create_role").await
    }

    /// Replace a custom role; `if_match` is the ETag of the last read.
    #[instrument(skip_all, fields(operation_id = "replace_role"))]
    pub async fn replace_role(
        &self,
        options: &ReplaceRoleOptions,
    ) -> SdkResult<DetailedResponse<CustomRole>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::PUT,
            "/v2/roles/{role_id}",
            &[("role_id", options.role_id.as_str())],
            &options.headers,
            "ReplaceRole",
        )?;
        let body = ReplaceRoleBody {
            display_name: &options.display_name,
            actions: &options.actions,
            description: options.description.as_deref(),
        };
        set_json_body(&mut builder, &body)?;
        builder.add_header(IF_MATCH_HEADER, options.if_match.as_str());
        self.send(&builder, "replace_role").await
    }

    /// Custom role by ID, with its ETag.
    #[instrument(skip_all, fields(operation_id = "get_role"))]
    pub async fn get_role(
        &self,
        options: &GetRoleOptions,
    ) -> SdkResult<DetailedResponse<CustomRole>> {
        options.validate().map_err(in_component)?;
        let builder = self.prepare(
            Method::GET,
            "/v2/roles/{role_id}",
            &[("role_id", options.role_id.as_str())],
            &options.headers,
            "GetRole",
        )?;
        self.send(&builder, "get_role").await
    }

    /// Delete a custom role by ID.
    #[instrument(skip_all, fields(operation_id = "delete_role"))]
    pub async fn delete_role(
        &self,
        options: &DeleteRoleOptions,
    ) -> SdkResult<DetailedResponse<()>> {
        options.validate().map_err(in_component)?;
        let builder = self.prepare(
            Method::DELETE,
            "/v2/roles/{role_id}",
            &[("role_id", options.role_id.as_str())],
            &options.headers,
            "DeleteRole",
        )?;
        self.send_empty(&builder, "delete_role").await
    }

    /// v2 policies of an account, filtered by the options' query values.
    #[instrument(skip_all, fields(operation_id = "list_v2_policies"))]
    pub async fn list_v2_policies(
        &self,
        options: &ListV2PoliciesOptions,
    ) -> SdkResult<DetailedResponse<V2PolicyCollection>> {
        options.validate().map_err(in_component)?;
        let mut builder =
            self.prepare(Method::GET, "/v2/policies", &[], &options.headers, "ListV2Policies")?;
        builder
            .add_optional_header(ACCEPT_LANGUAGE_HEADER, options.accept_language.as_deref())
            .add_query("account_id", options.account_id.as_str())
            .add_optional_query("iam_id", options.iam_id.as_deref())
            .add_optional_query("access_group_id", options.access_group_id.as_deref())
            .add_optional_query("type", options.policy_type.as_ref().map(PolicyType::as_str))
            .add_optional_query("service_type", options.service_type.as_ref().map(|t| t.as_str()))
            .add_optional_query("service_name", options.service_name.as_deref())
            .add_optional_query("service_group_id", options.service_group_id.as_deref())
            .add_optional_query("sort", options.sort.as_deref())
            .add_optional_query("format", options.format.as_ref().map(|f| f.as_str()))
            .add_optional_query("state", options.state.as_ref().map(PolicyState::as_str));
        self.send(&builder, "list_v2_policies").await
    }

    /// Create a v2 policy from a control, subject, resource and optional rule.
    #[instrument(skip_all, fields(operation_id = "create_v2_policy"))]
    pub async fn create_v2_policy(
        &self,
        options: &CreateV2PolicyOptions,
    ) -> SdkResult<DetailedResponse<V2Policy>> {
        options.validate().map_err(in_component)?;
        let mut builder =
            self.prepare(Method::POST, "/v2/policies", &[], &options.headers, "CreateV2Policy")?;
        let body = V2PolicyBody {
            control: &options.control,
            policy_type: &options.policy_type,
            description: options.description.as_deref(),
            subject: options.subject.as_ref(),
            resource: options.resource.as_ref(),
            pattern: options.pattern.as_deref(),
            rule: options.rule.as_ref(),
        };
        set_json_body(&mut builder, &body)?;
        builder.add_optional_header(ACCEPT_LANGUAGE_HEADER, options.accept_language.as_deref());
        self.send(&builder, "create_v2_policy").await
    }

    /// Replace a v2 policy; `if_match` is the ETag of the last read.
    #[instrument(skip_all, fields(operation_id = "replace_v2_policy"))]
    pub async fn replace_v2_policy(
        &self,
        options: &ReplaceV2PolicyOptions,
    ) -> SdkResult<DetailedResponse<V2Policy>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::PUT,
            "/v2/policies/{id}",
            &[("id", options.id.as_str())],
            &options.headers,
            "ReplaceV2Policy",
        )?;
        let body = V2PolicyBody {
            control: &options.control,
            policy_type: &options.policy_type,
            description: options.description.as_deref(),
            subject: options.subject.as_ref(),
            resource: options.resource.as_ref(),
            pattern: options.pattern.as_deref(),
            rule: options.rule.as_ref(),
        };
        set_json_body(&mut builder, &body)?;
        builder.add_header(IF_MATCH_HEADER, options.if_match.as_str());
        self.send(&builder, "replace_v2_policy").await
    }

    /// v2 policy by ID, with its ETag.
    #[instrument(skip_all, fields(operation_id = "get_v2_policy"))]
    pub async fn get_v2_policy(
        &self,
        options: &GetV2PolicyOptions,
    ) -> SdkResult<DetailedResponse<V2Policy>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::GET,
            "/v2/policies/{id}",
            &[("id", options.id.as_str())],
            &options.headers,
            "GetV2Policy",
        )?;
        builder.add_optional_query("format", options.format.as_ref().map(|f| f.as_str()));
        self.send(&builder, "get_v2_policy").await
    }

    /// Delete a v2 policy by ID.
    #[instrument(skip_all, fields(operation_id = "delete_v2_policy"))]
    pub async fn delete_v2_policy(
        &self,
        options: &DeleteV2PolicyOptions,
    ) -> SdkResult<DetailedResponse<()>> {
        options.validate().map_err(in_component)?;
        let builder = self.prepare(
            Method::DELETE,
            "/v2/policies/{id}",
            &[("id", options.id.as_str())],
            &options.headers,
            "DeleteV2Policy",
        )?;
        self.send_empty(&builder, "delete_v2_policy").await
    }

    /// One page of policy templates; follow
    /// [`PolicyTemplateCollection::next_start`] for the next.
    #[instrument(skip_all, fields(operation_id = "list_policy_templates"))]
    pub async fn list_policy_templates(
        &self,
        options: &ListPolicyTemplatesOptions,
    ) -> SdkResult<DetailedResponse<PolicyTemplateCollection>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::GET,
            "/v1/policy_templates",
            &[],
            &options.headers,
            "ListPolicyTemplates",
        )?;
        builder
            .add_optional_header(ACCEPT_LANGUAGE_HEADER, options.accept_language.as_deref())
            .add_query("account_id", options.account_id.as_str())
            .add_optional_query("state", options.state.as_ref().map(PolicyState::as_str))
            .add_optional_query("name", options.name.as_deref())
            .add_optional_query(
                "policy_service_type",
                options.policy_service_type.as_ref().map(|t| t.as_str()),
            )
            .add_optional_query("policy_service_name", options.policy_service_name.as_deref())
            .add_optional_query(
                "policy_service_group_id",
                options.policy_service_group_id.as_deref(),
            )
            .add_optional_query("policy_type", options.policy_type.as_ref().map(PolicyType::as_str))
            .add_optional_query("limit", options.limit.as_ref())
            .add_optional_query("start", options.start.as_deref());
        self.send(&builder, "list_policy_templates").await
    }

    /// Latest version of a policy template.
    #[instrument(skip_all, fields(operation_id = "get_policy_template"))]
    pub async fn get_policy_template(
        &self,
        options: &GetPolicyTemplateOptions,
    ) -> SdkResult<DetailedResponse<PolicyTemplate>> {
        options.validate().map_err(in_component)?;
        let mut builder = self.prepare(
            Method::GET,
            "/v1/policy_templates/{policy_template_id}",
            &[("policy_template_id", options.policy_template_id.as_str())],
            &options.headers,
            "GetPolicyTemplate",
        )?;
        builder.add_optional_query("state", options.state.as_ref().map(PolicyState::as_str));
        self.send(&builder, "get_policy_template").await
    }

    /// One version of a policy template.
    #[instrument(skip_all, fields(operation_id = "get_policy_template_version"))]
    pub async fn get_policy_template_version(
        &self,
        options: &GetPolicyTemplateVersionOptions,
    ) -> SdkResult<DetailedResponse<PolicyTemplate>> {
        options.validate().map_err(in_component)?;
        let builder = self.prepare(
            Method::GET,
            "/v1/policy_templates/{policy_template_id}/versions/{version}",
            &[
                ("policy_template_id", options.policy_template_id.as_str()),
                ("version", options.version.as_str()),
            ],
            &options.headers,
            "GetPolicyTemplateVersion",
        )?;
        self.send(&builder, "get_policy_template_version").await
    }

    /// Resolve the URL and apply caller and SDK headers. Deletes answer
    /// with no body, so only other methods ask for JSON.
    fn prepare(
        &self,
        method: Method,
        path: &str,
        path_params: &[(&str, &str)],
        headers: &HashMap<String, String>,
        sdk_operation: &str,
    ) -> SdkResult<RequestBuilder> {
        let expects_body = method != Method::DELETE;
        let mut builder = RequestBuilder::new(method);
        builder.enable_gzip(self.service.enable_gzip_compression());
        builder
            .resolve_request_url(self.service.service_url(), path, path_params)
            .map_err(in_component)?;
        builder.add_headers(headers);
        builder.add_sdk_headers(SDK_SERVICE_NAME, SDK_SERVICE_VERSION, sdk_operation);
        if expects_body {
            builder.add_header("Accept", "application/json");
        }
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

    async fn send_empty(
        &self,
        builder: &RequestBuilder,
        operation_id: &str,
    ) -> SdkResult<DetailedResponse<()>> {
        let request = builder.build().map_err(in_component)?;
        let response = self.service.request(request, operation_id).await.map_err(in_component)?;
        Ok(response.into_empty())
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
struct PolicyBody<'a> {
    #[serde(rename = "type")]
    policy_type: &'a PolicyType,
    subjects: &'a [PolicySubject],
    roles: &'a [PolicyRole],
    resources: &'a [PolicyResource],
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct StateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a PolicyState>,
}

#[derive(Serialize)]
struct CreateRoleBody<'a> {
    display_name: &'a str,
    actions: &'a [String],
    name: &'a str,
    account_id: &'a str,
    service_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct ReplaceRoleBody<'a> {
    display_name: &'a str,
    actions: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct V2PolicyBody<'a> {
    control: &'a Control,
    #[serde(rename = "type")]
    policy_type: &'a PolicyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a V2PolicySubject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<&'a V2PolicyResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<&'a V2PolicyRule>,
}

#[cfg(test)]
mod tests {
    use ibmcloud_core::NoAuthAuthenticator;
    use serde_json::json;

    use super::*;
    use crate::models::{Grant, Roles};

    #[test]
    fn defaults_to_global_endpoint() {
        let client =
            IamPolicyManagementV1::new(IamPolicyManagementV1Options::new(Arc::new(NoAuthAuthenticator)))
                .unwrap();
        assert_eq!(client.service_url(), "https://iam.cloud.ibm.com");
    }

    #[test]
    fn errors_name_this_crate() {
        let err = IamPolicyManagementV1::new(IamPolicyManagementV1Options::default()).unwrap_err();
        assert_eq!(err.code(), codes::NEW_BASE_ERROR);
        assert_eq!(err.component().map(|c| c.name.as_str()), Some("ibmcloud-iam-policy"));

        let err = IamPolicyManagementV1::service_url_for_region("us-south").unwrap_err();
        assert_eq!(err.code(), codes::NO_REGIONAL_SUPPORT);
    }

    #[test]
    fn v2_body_omits_unset_fields() {
        let control = Control::new(Grant::new(vec![Roles::new("crn:role:Viewer").unwrap()]));
        let body = V2PolicyBody {
            control: &control,
            policy_type: &PolicyType::Access,
            description: None,
            subject: None,
            resource: None,
            pattern: Some("time-based-conditions:once"),
            rule: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "control": {"grant": {"roles": [{"role_id": "crn:role:Viewer"}]}},
                "type": "access",
                "pattern": "time-based-conditions:once",
            })
        );
    }

    #[test]
    fn state_body_is_empty_without_state() {
        assert_eq!(serde_json::to_value(StateBody { state: None }).unwrap(), json!({}));
    }
}
