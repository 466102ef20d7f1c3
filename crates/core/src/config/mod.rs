//! External service configuration
//!
//! Settings for a service are looked up under an upper-cased key prefix
//! derived from its name (`db2saas` → `DB2SAAS_`). See [`loader`] for the
//! sources that are consulted.

pub mod loader;
mod service_url;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use ibmcloud_common::error::{codes, SdkError, SdkResult};
use serde::{Deserialize, Serialize};

pub use service_url::construct_service_url;
pub use loader::{
    env_bool, env_var, get_authenticator_from_environment, load, load_from_file, load_properties,
};

use crate::auth::{
    Authenticator, BasicAuthenticator, BearerTokenAuthenticator, IamAuthenticator,
    NoAuthAuthenticator, AUTHTYPE_BASIC, AUTHTYPE_BEARER_TOKEN, AUTHTYPE_IAM, AUTHTYPE_NOAUTH,
};
use crate::http::RetryPolicy;

/// Service endpoint.
pub const PROPNAME_URL: &str = "URL";
/// Skip TLS certificate verification.
pub const PROPNAME_DISABLE_SSL: &str = "DISABLE_SSL";
/// Compress request bodies.
pub const PROPNAME_ENABLE_GZIP: &str = "ENABLE_GZIP";
/// Turn on automatic retries.
pub const PROPNAME_ENABLE_RETRIES: &str = "ENABLE_RETRIES";
/// Retries after the first attempt.
pub const PROPNAME_MAX_RETRIES: &str = "MAX_RETRIES";
/// Longest delay between retries, in seconds.
pub const PROPNAME_RETRY_INTERVAL: &str = "RETRY_INTERVAL";
/// Per-request timeout, in seconds.
pub const PROPNAME_TIMEOUT: &str = "TIMEOUT";
/// One of the `AUTHTYPE_*` values.
pub const PROPNAME_AUTH_TYPE: &str = "AUTH_TYPE";
/// IAM API key.
pub const PROPNAME_APIKEY: &str = "APIKEY";
/// Static bearer token.
pub const PROPNAME_BEARER_TOKEN: &str = "BEARER_TOKEN";
/// Basic auth user.
pub const PROPNAME_USERNAME: &str = "USERNAME";
/// Basic auth password.
pub const PROPNAME_PASSWORD: &str = "PASSWORD";
/// IAM token endpoint base URL.
pub const PROPNAME_AUTH_URL: &str = "AUTH_URL";
/// IAM client id.
pub const PROPNAME_CLIENT_ID: &str = "CLIENT_ID";
/// IAM client secret.
pub const PROPNAME_CLIENT_SECRET: &str = "CLIENT_SECRET";
/// IAM token scope.
pub const PROPNAME_SCOPE: &str = "SCOPE";
/// Skip TLS verification when fetching IAM tokens.
pub const PROPNAME_AUTH_DISABLE_SSL: &str = "AUTH_DISABLE_SSL";

/// Settings for one service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service endpoint override.
    pub url: Option<String>,
    /// Skip TLS certificate verification.
    pub disable_ssl: bool,
    /// Compress request bodies.
    pub enable_gzip: bool,
    /// Turn on automatic retries.
    pub enable_retries: bool,
    /// Retries after the first attempt; default when unset.
    pub max_retries: Option<usize>,
    /// Longest delay between retries.
    pub retry_interval_secs: Option<u64>,
    /// Per-request timeout.
    pub timeout_secs: Option<u64>,
    /// Credentials.
    pub auth: AuthConfig,
}

/// Credentials for one service
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// One of the `AUTHTYPE_*` values.
    pub auth_type: Option<String>,
    /// IAM API key.
    pub apikey: Option<String>,
    /// Static bearer token.
    pub bearer_token: Option<String>,
    /// Basic auth user.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// IAM token endpoint base URL.
    pub auth_url: Option<String>,
    /// IAM client id.
    pub client_id: Option<String>,
    /// IAM client secret.
    pub client_secret: Option<String>,
    /// IAM token scope.
    pub scope: Option<String>,
    /// Skip TLS verification when fetching IAM tokens.
    pub auth_disable_ssl: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("auth_type", &self.auth_type)
            .field("auth_url", &self.auth_url)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl ServiceConfig {
    /// Build a config from un-prefixed property names (`URL`, `APIKEY`, ...).
    ///
    /// # Errors
    /// `config-error` when a numeric property does not parse.
    pub fn from_properties(props: &HashMap<String, String>) -> SdkResult<Self> {
        let get = |key: &str| props.get(key).filter(|value| !value.is_empty()).cloned();
        let flag = |key: &str| props.get(key).is_some_and(|value| parse_bool(value));

        Ok(Self {
            url: get(PROPNAME_URL),
            disable_ssl: flag(PROPNAME_DISABLE_SSL),
            enable_gzip: flag(PROPNAME_ENABLE_GZIP),
            enable_retries: flag(PROPNAME_ENABLE_RETRIES),
            max_retries: parse_number(props, PROPNAME_MAX_RETRIES)?,
            retry_interval_secs: parse_number(props, PROPNAME_RETRY_INTERVAL)?,
            timeout_secs: parse_number(props, PROPNAME_TIMEOUT)?,
            auth: AuthConfig {
                auth_type: get(PROPNAME_AUTH_TYPE),
                apikey: get(PROPNAME_APIKEY),
                bearer_token: get(PROPNAME_BEARER_TOKEN),
                username: get(PROPNAME_USERNAME),
                password: get(PROPNAME_PASSWORD),
                auth_url: get(PROPNAME_AUTH_URL),
                client_id: get(PROPNAME_CLIENT_ID),
                client_secret: get(PROPNAME_CLIENT_SECRET),
                scope: get(PROPNAME_SCOPE),
                auth_disable_ssl: flag(PROPNAME_AUTH_DISABLE_SSL),
            },
        })
    }

    /// Retry policy when retries are enabled.
    pub fn retry_policy(&self) -> Option<RetryPolicy> {
        self.enable_retries.then(|| {
            RetryPolicy::new(
                self.max_retries.unwrap_or(0),
                Duration::from_secs(self.retry_interval_secs.unwrap_or(0)),
            )
        })
    }

    /// Per-request timeout, when configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl AuthConfig {
    /// Effective auth type; `iam` when none was configured.
    pub fn auth_type(&self) -> &str {
        self.auth_type.as_deref().unwrap_or(AUTHTYPE_IAM)
    }

    /// Construct the configured authenticator.
    ///
    /// # Errors
    /// `config-error` for unknown auth types or incomplete credentials.
    pub fn build_authenticator(&self) -> SdkResult<Arc<dyn Authenticator>> {
        let auth_type = self.auth_type();

        if auth_type.eq_ignore_ascii_case(AUTHTYPE_IAM) {
            let mut builder = IamAuthenticator::builder()
                .apikey(self.apikey.clone().unwrap_or_default())
                .disable_ssl(self.auth_disable_ssl);
            if let Some(url) = &self.auth_url {
                builder = builder.url(url.clone());
            }
            match (&self.client_id, &self.client_secret) {
                (Some(id), Some(secret)) => builder = builder.client_id_secret(id, secret),
                (None, None) => {}
                _ => {
                    return Err(SdkError::configuration(
                        codes::CONFIG_ERROR,
                        "CLIENT_ID and CLIENT_SECRET must be specified together",
                    ))
                }
            }
            if let Some(scope) = &self.scope {
                builder = builder.scope(scope.clone());
            }
            Ok(Arc::new(builder.build()?))
        } else if auth_type.eq_ignore_ascii_case(AUTHTYPE_BEARER_TOKEN) {
            Ok(Arc::new(BearerTokenAuthenticator::new(
                self.bearer_token.clone().unwrap_or_default(),
            )?))
        } else if auth_type.eq_ignore_ascii_case(AUTHTYPE_BASIC) {
            Ok(Arc::new(BasicAuthenticator::new(
                self.username.clone().unwrap_or_default(),
                self.password.clone().unwrap_or_default(),
            )?))
        } else if auth_type.eq_ignore_ascii_case(AUTHTYPE_NOAUTH) {
            Ok(Arc::new(NoAuthAuthenticator))
        } else {
            Err(SdkError::configuration(
                codes::CONFIG_ERROR,
                format!("unrecognized authentication type: {auth_type}"),
            ))
        }
    }
}

/// `1`, `true`, `yes` and `on` (any case) are true.
pub(crate) fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_number<T: std::str::FromStr>(
    props: &HashMap<String, String>,
    key: &str,
) -> SdkResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match props.get(key).map(|value| value.trim()).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(|err| {
            SdkError::configuration(codes::CONFIG_ERROR, format!("invalid {key} '{value}': {err}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn parses_service_settings() {
        let config = ServiceConfig::from_properties(&props(&[
            ("URL", "https://example.com/api"),
            ("ENABLE_GZIP", "true"),
            ("ENABLE_RETRIES", "yes"),
            ("MAX_RETRIES", "3"),
            ("RETRY_INTERVAL", "10"),
            ("AUTH_TYPE", "noauth"),
        ]))
        .unwrap();

        assert_eq!(config.url.as_deref(), Some("https://example.com/api"));
        assert!(config.enable_gzip);
        assert!(!config.disable_ssl);
        let policy = config.retry_policy().unwrap();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.max_retry_interval, Duration::from_secs(10));
        assert_eq!(config.auth.build_authenticator().unwrap().authentication_type(), AUTHTYPE_NOAUTH);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = ServiceConfig::from_properties(&props(&[("MAX_RETRIES", "many")])).unwrap_err();
        assert_eq!(err.code(), codes::CONFIG_ERROR);
    }

    #[test]
    fn defaults_to_iam_and_validates_credentials() {
        let config = ServiceConfig::from_properties(&props(&[("APIKEY", "my-key")])).unwrap();
        assert_eq!(config.auth.auth_type(), AUTHTYPE_IAM);
        assert_eq!(config.auth.build_authenticator().unwrap().authentication_type(), AUTHTYPE_IAM);

        let missing = ServiceConfig::from_properties(&props(&[("AUTH_TYPE", "bearerToken")])).unwrap();
        assert!(missing.auth.build_authenticator().is_err());

        let unknown = ServiceConfig::from_properties(&props(&[("AUTH_TYPE", "kerberos")])).unwrap();
        assert_eq!(unknown.auth.build_authenticator().unwrap_err().code(), codes::CONFIG_ERROR);
    }

    #[test]
    fn debug_hides_secrets() {
        let config = ServiceConfig::from_properties(&props(&[
            ("APIKEY", "top-secret"),
            ("PASSWORD", "hunter2"),
        ]))
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn bool_values() {
        for value in ["1", "true", "YES", "On"] {
            assert!(parse_bool(value));
        }
        for value in ["0", "false", "off", ""] {
            assert!(!parse_bool(value));
        }
    }
}
