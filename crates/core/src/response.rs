//! Responses returned by the base service

use ibmcloud_common::error::{SdkError, SdkResult};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// Decoded response of a generated operation.
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    /// HTTP status.
    pub status_code: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// `None` when the service returned no body.
    pub result: Option<T>,
}

impl<T> DetailedResponse<T> {
    /// Borrow the decoded result.
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Take the decoded result.
    pub fn into_result(self) -> Option<T> {
        self.result
    }

    /// Header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// A successful response whose body has not been decoded yet.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status_code: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl RawResponse {
    /// Wrap a received response.
    pub fn new(status_code: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self { status_code, headers, body }
    }

    /// HTTP status.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decode the JSON body into `T`.
    ///
    /// # Errors
    /// `unmarshal-resp-error` when the body does not match `T`; the message
    /// carries the decoder's field-level detail.
    pub fn into_detailed<T: DeserializeOwned>(self) -> SdkResult<DetailedResponse<T>> {
        let result = if self.body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(serde_json::from_slice(&self.body).map_err(SdkError::deserialization)?)
        };
        Ok(DetailedResponse { status_code: self.status_code, headers: self.headers, result })
    }

    /// Drop the body, keeping status and headers.
    pub fn into_empty(self) -> DetailedResponse<()> {
        DetailedResponse { status_code: self.status_code, headers: self.headers, result: None }
    }
}
