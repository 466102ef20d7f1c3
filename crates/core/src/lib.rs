//! # IBM Cloud SDK core
//!
//! Shared plumbing for the generated service clients.
//!
//! This crate contains:
//! - [`BaseService`]: service URL, authenticator, default headers, gzip and
//!   retry settings, and the request/response cycle
//! - [`RequestBuilder`]: URL templating, headers, query and JSON bodies
//! - Authenticators: IAM API key, bearer token, basic and no-auth
//! - External configuration from credentials files, the environment and
//!   TOML/JSON files
//!
//! ## Architecture Principles
//! - Only depends on `ibmcloud-common` internally
//! - Every fallible call returns `SdkError` with a stable code
//! - Secrets never appear in `Debug` output or tracing events

pub mod auth;
pub mod config;
pub mod http;
pub mod request;
pub mod response;
pub mod sdk_headers;
pub mod service;

pub use auth::{
    Authenticator, BasicAuthenticator, BearerTokenAuthenticator, IamAuthenticator,
    NoAuthAuthenticator,
};
pub use config::{construct_service_url, get_authenticator_from_environment, ServiceConfig};
pub use http::{HttpClient, RetryPolicy};
pub use request::{PreparedRequest, RequestBuilder};
pub use response::{DetailedResponse, RawResponse};
pub use sdk_headers::get_sdk_headers;
pub use service::{BaseService, ServiceOptions};

// Re-exported so generated clients need a single dependency for HTTP types.
pub use reqwest::header::HeaderMap;
pub use reqwest::Method;
