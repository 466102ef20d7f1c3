use std::fmt;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ibmcloud_common::error::{SdkError, SdkResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use super::{validate_credential, Authenticator, AUTHTYPE_BASIC};

/// HTTP basic authentication.
#[derive(Clone)]
pub struct BasicAuthenticator {
    username: String,
    password: String,
}

impl BasicAuthenticator {
    /// # Errors
    /// Fails when either value is empty or wrapped in braces or quotes.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> SdkResult<Self> {
        let authenticator = Self { username: username.into(), password: password.into() };
        authenticator.validate()?;
        Ok(authenticator)
    }

    /// Configured user name.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for BasicAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthenticator")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_BASIC
    }

    fn validate(&self) -> SdkResult<()> {
        validate_credential("Username", &self.username)?;
        validate_credential("Password", &self.password)
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> SdkResult<()> {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}")).map_err(|err| {
            SdkError::authentication(format!("basic credentials are not a valid header: {err}"))
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
    async fn encodes_credentials() {
        let auth = BasicAuthenticator::new("user", "pass").unwrap();
        let mut headers = HeaderMap::new();
        auth.authenticate(&mut headers).await.unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Basic dXNlcjpwYXNz");
        assert_eq!(auth.username(), "user");
    }

    #[test]
    fn rejects_quoted_password() {
        assert!(BasicAuthenticator::new("user", "\"pass\"").is_err());
    }
}
