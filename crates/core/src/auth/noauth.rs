use async_trait::async_trait;
use ibmcloud_common::error::SdkResult;
use reqwest::header::HeaderMap;

use super::{Authenticator, AUTHTYPE_NOAUTH};

/// Sends requests without credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthAuthenticator;

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    fn authentication_type(&self) -> &'static str {
        AUTHTYPE_NOAUTH
    }

    fn validate(&self) -> SdkResult<()> {
        Ok(())
    }

    async fn authenticate(&self, _headers: &mut HeaderMap) -> SdkResult<()> {
        Ok(())
    }
}
