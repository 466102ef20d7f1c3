use std::fmt;

use async_trait::async_trait;
use ibmcloud_common::error::{SdkError, SdkResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use super::{validate_credential, Authenticator, AUTHTYPE_BEARER_TOKEN};

/// Sends a caller-managed bearer token.
#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    /// # Errors
    /// Fails when the token is empty or wrapped in braces or quotes.
    pub fn new(token: impl Into<String>) -> SdkResult<Self> {
        let authenticator = Self { token: token.into() };
        authenticator.validate()?;
        Ok(authenticator)
    }
}

impl fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerTokenAuthenticator").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_BEARER_TOKEN
    }

    fn validate(&self) -> SdkResult<()> {
        validate_credential("BearerToken", &self.token)
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> SdkResult<()> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|err| {
            SdkError::authentication(format!("bearer token is not a valid header value: {err}"))
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn adds_bearer_header() {
        let auth = BearerTokenAuthenticator::new("abc123").unwrap();
        let mut headers = HeaderMap::new();
        auth.authenticate(&mut headers).await.unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
        assert!(!format!("{auth:?}").contains("abc123"));
    }

    #[test]
    fn rejects_empty_token() {
        assert!(BearerTokenAuthenticator::new("").is_err());
    }
}
