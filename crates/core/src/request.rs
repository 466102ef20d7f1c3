//! Request construction for generated operations
//!
//! A [`RequestBuilder`] collects everything an operation needs (resolved URL,
//! headers, query parameters and an optional JSON body) and turns it into a
//! [`PreparedRequest`] that [`BaseService`](crate::BaseService) can send.

use std::collections::HashMap;
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use ibmcloud_common::error::{codes, ErrorKind, SdkError, SdkResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::sdk_headers;

/// A fully built request, ready to be authenticated and sent.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully resolved URL, query included.
    pub url: Url,
    /// Headers set on the builder.
    pub headers: HeaderMap,
    /// Encoded body, gzip-compressed when enabled.
    pub body: Option<Vec<u8>>,
}

/// Builder for a single HTTP request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Option<String>,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    gzip: bool,
}

impl RequestBuilder {
    /// Empty request for `method`; a URL must be resolved before `build`.
    pub fn new(method: Method) -> Self {
        Self { method, url: None, headers: Vec::new(), query: Vec::new(), body: None, gzip: false }
    }

    /// Join `service_url` and `path_template`, substituting each `{name}`
    /// placeholder with the percent-encoded value from `path_params`.
    ///
    /// # Errors
    /// `url-resolve-error` when the service URL is empty, a path parameter
    /// is empty or missing, or the result does not parse as a URL.
    pub fn resolve_request_url(
        &mut self,
        service_url: &str,
        path_template: &str,
        path_params: &[(&str, &str)],
    ) -> SdkResult<&mut Self> {
        if service_url.is_empty() {
            return Err(SdkError::url(codes::URL_RESOLVE_ERROR, "service URL is empty"));
        }

        let path = resolve_path(path_template, path_params)?;
        let joined = format!("{}{}", service_url.trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|err| {
            SdkError::url(codes::URL_RESOLVE_ERROR, format!("invalid request URL '{joined}': {err}"))
                .with_source(err)
        })?;

        self.url = Some(joined);
        Ok(self)
    }

    /// Set a header, replacing any earlier value with the same name.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Set every header in `headers`.
    pub fn add_headers(&mut self, headers: &HashMap<String, String>) -> &mut Self {
        for (name, value) in headers {
            self.add_header(name.clone(), value.clone());
        }
        self
    }

    /// Set a header only when a value is present.
    pub fn add_optional_header(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.add_header(name, value);
        }
        self
    }

    /// Append a query parameter. Repeated names are kept in order.
    pub fn add_query(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn add_optional_query<T: ToString + ?Sized>(
        &mut self,
        name: &str,
        value: Option<&T>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.add_query(name, value.to_string());
        }
        self
    }

    /// Add the `User-Agent` and analytics headers.
    pub fn add_sdk_headers(
        &mut self,
        service_name: &str,
        service_version: &str,
        operation_id: &str,
    ) -> &mut Self {
        for (name, value) in sdk_headers::get_sdk_headers(service_name, service_version, operation_id)
        {
            self.add_header(name, value);
        }
        self
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    /// `set-json-body-error` when serialization fails.
    pub fn set_body_json<T: Serialize + ?Sized>(&mut self, body: &T) -> SdkResult<&mut Self> {
        let bytes = serde_json::to_vec(body).map_err(SdkError::serialization)?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Gzip-compress the body when one is present.
    pub fn enable_gzip(&mut self, enabled: bool) -> &mut Self {
        self.gzip = enabled;
        self
    }

    /// Assemble the request.
    ///
    /// # Errors
    /// `build-error` when no URL was resolved, a header is not valid HTTP,
    /// or compression fails.
    pub fn build(&self) -> SdkResult<PreparedRequest> {
        let raw_url = self.url.as_deref().ok_or_else(|| build_error("request URL was not resolved"))?;
        let mut url = Url::parse(raw_url).map_err(|err| build_error(err.to_string()))?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| build_error(format!("invalid header name '{name}': {err}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|err| build_error(format!("invalid value for header '{name}': {err}")))?;
            headers.insert(header_name, header_value);
        }

        let body = match (&self.body, self.gzip) {
            (Some(body), true) => {
                headers.insert(
                    reqwest::header::CONTENT_ENCODING,
                    HeaderValue::from_static("gzip"),
                );
                Some(gzip(body)?)
            }
            (body, _) => body.clone(),
        };

        Ok(PreparedRequest { method: self.method.clone(), url, headers, body })
    }
}

fn resolve_path(template: &str, params: &[(&str, &str)]) -> SdkResult<String> {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        resolved.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| {
            SdkError::url(codes::URL_RESOLVE_ERROR, format!("unterminated placeholder in '{template}'"))
        })?;
        let name = &after[..end];

        let value = params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                SdkError::url(
                    codes::URL_RESOLVE_ERROR,
                    format!("no value supplied for path parameter '{name}'"),
                )
            })?;
        if value.is_empty() {
            return Err(SdkError::url(
                codes::URL_RESOLVE_ERROR,
                format!("path parameter '{name}' is empty"),
            ));
        }

        resolved.push_str(&urlencoding::encode(value));
        rest = &after[end + 1..];
    }

    resolved.push_str(rest);
    Ok(resolved)
}

fn gzip(body: &[u8]) -> SdkResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body).map_err(|err| build_error(format!("gzip failed: {err}")))?;
    encoder.finish().map_err(|err| build_error(format!("gzip failed: {err}")))
}

fn build_error(message: impl Into<String>) -> SdkError {
    SdkError::new(ErrorKind::Request, codes::BUILD_ERROR, message)
}
