//! Request authentication
//!
//! Every [`BaseService`](crate::BaseService) owns one [`Authenticator`], shared
//! between clones of the service. Authenticators add credentials to the
//! outgoing headers right before a request is sent.

mod basic;
mod bearer;
mod iam;
mod noauth;

use std::fmt;

use async_trait::async_trait;
use ibmcloud_common::error::{codes, SdkError, SdkResult};
use reqwest::header::HeaderMap;

pub use basic::BasicAuthenticator;
pub use bearer::BearerTokenAuthenticator;
pub use iam::{IamAuthenticator, IamAuthenticatorBuilder, DEFAULT_IAM_URL};
pub use noauth::NoAuthAuthenticator;

/// IAM API key exchanged for a bearer token.
pub const AUTHTYPE_IAM: &str = "iam";
/// Caller-supplied bearer token.
pub const AUTHTYPE_BEARER_TOKEN: &str = "bearerToken";
/// HTTP basic authentication.
pub const AUTHTYPE_BASIC: &str = "basic";
/// No credentials.
pub const AUTHTYPE_NOAUTH: &str = "noAuth";

/// Adds credentials to outgoing requests
///
/// This trait allows dependency injection and testing with mock
/// authenticators.
#[async_trait]
pub trait Authenticator: Send + Sync + fmt::Debug {
    /// One of the `AUTHTYPE_*` constants.
    fn authentication_type(&self) -> &'static str;

    /// Check the configuration without contacting any service.
    fn validate(&self) -> SdkResult<()>;

    /// Add credentials to `headers`, fetching or refreshing tokens if needed.
    async fn authenticate(&self, headers: &mut HeaderMap) -> SdkResult<()>;
}

/// True when `value` starts or ends with `{`, `}` or `"`.
///
/// Catches credentials pasted with their template braces or quotes still
/// attached.
pub fn has_bad_first_or_last_char(value: &str) -> bool {
    const BAD: [char; 3] = ['{', '}', '"'];
    value.starts_with(BAD) || value.ends_with(BAD)
}

pub(crate) fn validate_credential(name: &str, value: &str) -> SdkResult<()> {
    if value.is_empty() {
        return Err(SdkError::configuration(
            codes::AUTHENTICATION_ERROR,
            format!("the {name} property is required but was not specified"),
        ));
    }
    if has_bad_first_or_last_char(value) {
        return Err(SdkError::configuration(
            codes::AUTHENTICATION_ERROR,
            format!(
                "the {name} property is invalid; remove any surrounding {{, }} or \" characters"
            ),
        ));
    }
    Ok(())
}
