//! IAM API key authentication
//!
//! Exchanges an API key for an IAM access token and caches it:
//! - the token is fetched lazily on the first request
//! - it is refreshed once 80% of its lifetime has elapsed
//! - concurrent callers share one refresh

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use ibmcloud_common::error::{HttpProblem, SdkError, SdkResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{validate_credential, Authenticator, AUTHTYPE_IAM};

/// Production IAM endpoint.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

const TOKEN_PATH: &str = "/identity/token";
const GRANT_TYPE_APIKEY: &str = "urn:ibm:params:oauth:grant-type:apikey";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
    #[serde(default)]
    expiration: i64,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
    refresh_at: i64,
}

impl CachedToken {
    fn from_response(response: TokenResponse, now: i64) -> Self {
        let expires_at = if response.expiration > 0 {
            response.expiration
        } else {
            now + response.expires_in
        };
        let lifetime = if response.expires_in > 0 { response.expires_in } else { expires_at - now };
        // refresh once 80% of the lifetime has passed
        let refresh_at = expires_at - lifetime / 5;
        Self { access_token: response.access_token, expires_at, refresh_at }
    }

    fn needs_refresh(&self, now: i64) -> bool {
        now >= self.refresh_at || now >= self.expires_at
    }
}

/// Authenticates with an IAM access token obtained from an API key.
#[derive(Clone)]
pub struct IamAuthenticator {
    apikey: String,
    url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    scope: Option<String>,
    http: reqwest::Client,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl IamAuthenticator {
    /// Builder for custom endpoints, client credentials or scope.
    pub fn builder() -> IamAuthenticatorBuilder {
        IamAuthenticatorBuilder::default()
    }

    /// Authenticator for `apikey` against the production endpoint.
    pub fn new(apikey: impl Into<String>) -> SdkResult<Self> {
        Self::builder().apikey(apikey).build()
    }

    /// Token service base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current access token, requesting a new one when the cached token is
    /// missing or due for refresh.
    pub async fn access_token(&self) -> SdkResult<String> {
        let now = Utc::now().timestamp();
        if let Some(cached) = self.token.read().await.as_ref() {
            if !cached.needs_refresh(now) {
                return Ok(cached.access_token.clone());
            }
        }

        let mut slot = self.token.write().await;
        if let Some(cached) = slot.as_ref() {
            if !cached.needs_refresh(now) {
                return Ok(cached.access_token.clone());
            }
        }

        let fresh = self.request_token().await?;
        let access_token = fresh.access_token.clone();
        *slot = Some(fresh);
        Ok(access_token)
    }

    async fn request_token(&self) -> SdkResult<CachedToken> {
        let endpoint = format!("{}{}", self.url.trim_end_matches('/'), TOKEN_PATH);
        debug!(url = %endpoint, "requesting IAM access token");

        let mut form = vec![
            ("grant_type", GRANT_TYPE_APIKEY),
            ("apikey", self.apikey.as_str()),
            ("response_type", "cloud_iam"),
        ];
        if let Some(scope) = self.scope.as_deref() {
            form.push(("scope", scope));
        }

        let mut request =
            self.http.post(&endpoint).header(ACCEPT, "application/json").form(&form);
        if let (Some(id), Some(secret)) = (&self.client_id, &self.client_secret) {
            request = request.basic_auth(id, Some(secret));
        }

        let response = request.send().await.map_err(|err| {
            SdkError::authentication(format!("IAM token request failed: {err}")).with_source(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            let problem = HttpProblem::from_response(
                status.as_u16(),
                "request_token",
                body,
                status.canonical_reason().unwrap_or("IAM token request failed"),
            );
            return Err(SdkError::authentication(format!(
                "IAM token request returned {}: {}",
                problem.status_code, problem.message
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|err| {
            SdkError::authentication(format!("invalid IAM token response: {err}")).with_source(err)
        })?;

        let cached = CachedToken::from_response(token, Utc::now().timestamp());
        info!(expires_at = cached.expires_at, "obtained IAM access token");
        Ok(cached)
    }
}

impl fmt::Debug for IamAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamAuthenticator")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_IAM
    }

    fn validate(&self) -> SdkResult<()> {
        validate_credential("ApiKey", &self.apikey)?;
        match (&self.client_id, &self.client_secret) {
            (Some(_), None) | (None, Some(_)) => Err(SdkError::configuration(
                ibmcloud_common::codes::AUTHENTICATION_ERROR,
                "client id and client secret must be specified together",
            )),
            _ => Ok(()),
        }
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> SdkResult<()> {
        let token = self.access_token().await?;
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
            SdkError::authentication(format!("IAM token is not a valid header value: {err}"))
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Builder for [`IamAuthenticator`].
#[derive(Default)]
pub struct IamAuthenticatorBuilder {
    apikey: String,
    url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    scope: Option<String>,
    disable_ssl: bool,
    timeout: Option<Duration>,
}

impl IamAuthenticatorBuilder {
    /// API key to exchange; required.
    pub fn apikey(mut self, apikey: impl Into<String>) -> Self {
        self.apikey = apikey.into();
        self
    }

    /// Token service base URL; defaults to [`DEFAULT_IAM_URL`].
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Client credentials sent as basic auth on the token request.
    pub fn client_id_secret(mut self, id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self.client_secret = Some(secret.into());
        self
    }

    /// Scope requested for the token.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Skip TLS verification on the token endpoint.
    pub fn disable_ssl(mut self, disabled: bool) -> Self {
        self.disable_ssl = disabled;
        self
    }

    /// Timeout for token requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the settings and build the authenticator.
    ///
    /// # Errors
    /// Fails validation or when the token HTTP client cannot be built.
    pub fn build(self) -> SdkResult<IamAuthenticator> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(30)))
            .danger_accept_invalid_certs(self.disable_ssl)
            .no_proxy()
            .build()
            .map_err(|err| {
                SdkError::authentication(format!("failed to build IAM HTTP client: {err}"))
                    .with_source(err)
            })?;

        let authenticator = IamAuthenticator {
            apikey: self.apikey,
            url: self.url.filter(|url| !url.is_empty()).unwrap_or_else(|| DEFAULT_IAM_URL.to_string()),
            client_id: self.client_id,
            client_secret: self.client_secret,
            scope: self.scope,
            http,
            token: Arc::new(RwLock::new(None)),
        };
        authenticator.validate()?;
        Ok(authenticator)
    }
}
