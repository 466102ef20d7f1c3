//! The base service every generated client delegates to
//!
//! [`BaseService`] owns the transport settings of one client: service URL,
//! authenticator, default headers, gzip and retry behaviour. Generated
//! clients build a [`PreparedRequest`](crate::PreparedRequest) per operation
//! and hand it to [`BaseService::request`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use ibmcloud_common::error::{codes, HttpProblem, SdkError, SdkResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, info, instrument};
use url::Url;

use crate::auth::{has_bad_first_or_last_char, Authenticator};
use crate::config;
use crate::http::{retry_after, HttpClient, RetryPolicy};
use crate::request::PreparedRequest;
use crate::response::RawResponse;

/// Settings for constructing a [`BaseService`]
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Initial service URL, usually the client's default.
    pub url: Option<String>,
    /// Name used for external configuration and error reports.
    pub service_name: Option<String>,
    /// Credentials for every request.
    pub authenticator: Arc<dyn Authenticator>,
    /// Transport override, e.g. with a custom timeout.
    pub http_client: Option<HttpClient>,
}

impl ServiceOptions {
    /// Options with only an authenticator set.
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { url: None, service_name: None, authenticator, http_client: None }
    }

    /// Set the initial service URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the service name.
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Replace the default transport.
    #[must_use]
    pub fn with_http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }
}

/// Shared HTTP plumbing for generated clients
///
/// Clones share the authenticator (and its token cache) but own every other
/// setting, so a clone can be reconfigured without affecting the original.
#[derive(Debug, Clone)]
pub struct BaseService {
    http: HttpClient,
    service_url: String,
    service_name: Option<String>,
    authenticator: Arc<dyn Authenticator>,
    default_headers: HeaderMap,
    enable_gzip: bool,
}

impl BaseService {
    /// # Errors
    /// `new-base-error` when the authenticator fails validation or the HTTP
    /// client cannot be built; `set-url-error` for an invalid URL.
    pub fn new(options: ServiceOptions) -> SdkResult<Self> {
        options
            .authenticator
            .validate()
            .map_err(|err| err.with_code(codes::NEW_BASE_ERROR))?;

        let http = match options.http_client {
            Some(client) => client,
            None => HttpClient::new().map_err(|err| err.with_code(codes::NEW_BASE_ERROR))?,
        };

        let mut service = Self {
            http,
            service_url: String::new(),
            service_name: options.service_name,
            authenticator: options.authenticator,
            default_headers: HeaderMap::new(),
            enable_gzip: false,
        };

        if let Some(url) = options.url {
            service.set_service_url(&url)?;
        }

        Ok(service)
    }

    /// # Errors
    /// `set-url-error` when the URL is empty, still contains `{`/`}`, or
    /// does not parse.
    pub fn set_service_url(&mut self, url: &str) -> SdkResult<()> {
        if url.is_empty() {
            return Err(SdkError::url(codes::SET_URL_ERROR, "service URL is empty"));
        }
        if has_bad_first_or_last_char(url) || url.contains(['{', '}']) {
            return Err(SdkError::url(
                codes::SET_URL_ERROR,
                format!("service URL '{url}' still contains unresolved variables or quotes"),
            ));
        }
        Url::parse(url).map_err(|err| {
            SdkError::url(codes::SET_URL_ERROR, format!("service URL '{url}' is invalid: {err}"))
                .with_source(err)
        })?;

        self.service_url = url.trim_end_matches('/').to_string();
        Ok(())
    }

    /// Base URL every request path is appended to.
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Name used for external configuration.
    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    /// Shared authenticator.
    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    /// Headers added to every request that does not already carry them.
    ///
    /// # Errors
    /// `build-error` when a name or value is not valid HTTP.
    pub fn set_default_headers(&mut self, headers: &HashMap<String, String>) -> SdkResult<()> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                SdkError::validation(codes::BUILD_ERROR, format!("invalid header name '{name}': {err}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|err| {
                SdkError::validation(codes::BUILD_ERROR, format!("invalid header value: {err}"))
            })?;
            map.insert(name, value);
        }
        self.default_headers = map;
        Ok(())
    }

    /// Headers added to every request.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Compress request bodies with gzip.
    pub fn set_enable_gzip_compression(&mut self, enabled: bool) {
        self.enable_gzip = enabled;
    }

    /// True when request bodies are compressed.
    pub fn enable_gzip_compression(&self) -> bool {
        self.enable_gzip
    }

    /// Retry 429, 5xx (except 501) and transport failures.
    ///
    /// Zero values select the defaults of 4 retries and a 30 second cap.
    pub fn enable_retries(&mut self, max_retries: usize, max_retry_interval: Duration) {
        let policy = RetryPolicy::new(max_retries, max_retry_interval);
        self.http = self.http.with_retry_policy(Some(policy));
    }

    /// Send every request exactly once.
    pub fn disable_retries(&mut self) {
        self.http = self.http.with_retry_policy(None);
    }

    /// Active retry policy, if retries are enabled.
    pub fn retry_policy(&self) -> Option<&RetryPolicy> {
        self.http.retry_policy()
    }

    /// Apply external settings (URL, TLS, gzip, retries, timeout) for
    /// `service_name`. Does nothing when no configuration exists.
    ///
    /// # Errors
    /// `config-error` when the configuration cannot be read, or the
    /// configured URL is invalid.
    pub fn configure_service(&mut self, service_name: &str) -> SdkResult<()> {
        let settings = config::load(service_name)?;

        if let Some(url) = &settings.url {
            self.set_service_url(url)?;
        }

        if settings.disable_ssl || settings.timeout().is_some() {
            let mut builder = HttpClient::builder().accept_invalid_certs(settings.disable_ssl);
            if let Some(timeout) = settings.timeout() {
                builder = builder.timeout(timeout);
            }
            if let Some(policy) = self.http.retry_policy() {
                builder = builder.retry_policy(*policy);
            }
            self.http = builder.build()?;
        }

        if settings.enable_gzip {
            self.enable_gzip = true;
        }

        if let Some(policy) = settings.retry_policy() {
            self.http = self.http.with_retry_policy(Some(policy));
        }

        debug!(service = service_name, url = %self.service_url, "applied external configuration");
        Ok(())
    }

    /// Authenticate and send `request`.
    ///
    /// # Errors
    /// `http-request-err` for transport failures and non-2xx responses; the
    /// latter carry an [`HttpProblem`] tagged with `operation_id`.
    #[instrument(skip(self, request), fields(operation_id = %operation_id, method = %request.method))]
    pub async fn request(
        &self,
        request: PreparedRequest,
        operation_id: &str,
    ) -> SdkResult<RawResponse> {
        let PreparedRequest { method, url, mut headers, body } = request;

        for (name, value) in &self.default_headers {
            if !headers.contains_key(name) {
                headers.insert(name.clone(), value.clone());
            }
        }

        self.authenticator.authenticate(&mut headers).await?;

        let mut builder = self.http.request(method, url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = self.http.send(builder).await.map_err(|err| {
            err.trace();
            err
        })?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(|err| {
            SdkError::request(format!("failed to read response body: {err}"), err)
        })?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            let mut problem = HttpProblem::from_response(
                status.as_u16(),
                operation_id,
                Some(body),
                status.canonical_reason().unwrap_or("request failed"),
            )
            .with_retry_after(retry_after(&response_headers));
            if let Some(name) = &self.service_name {
                problem = problem.with_service(name.clone());
            }
            let err = SdkError::http(problem);
            err.trace();
            return Err(err);
        }

        info!(status = status.as_u16(), %url, "request successful");
        Ok(RawResponse::new(status.as_u16(), response_headers, bytes.to_vec()))
    }
}
