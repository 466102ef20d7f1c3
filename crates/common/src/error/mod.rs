//! Error types shared by every IBM Cloud service client
//!
//! Every fallible step of a client call returns an [`SdkError`]. Errors are
//! told apart by their short machine-readable [`code`](SdkError::code) (for
//! example `url-resolve-error` or `http-request-err`), not by Rust type. The
//! coarser [`ErrorKind`] groups codes for classification and logging.
//!
//! # Error Handling Architecture
//!
//! 1. **`SdkError`**: a single error struct carrying the code, a message,
//!    the component (SDK name and version) that raised or wrapped it, an
//!    optional [`HttpProblem`] for non-2xx responses and the underlying
//!    source error.
//!
//! 2. **`ErrorClassification` trait**: retryability, severity and criticality
//!    so callers can build their own retry or alerting policy.
//!
//! 3. **`ErrorSeverity` enum**: a unified severity level for monitoring.
//!
//! ## Wrapping
//!
//! Errors are wrapped, never replaced, as they travel outwards. The base
//! service raises `http-request-err`; the generated client then stamps its
//! own component onto it:
//!
//! ```rust
//! use ibmcloud_common::error::{codes, ComponentInfo, SdkError};
//!
//! let err = SdkError::validation(codes::STRUCT_VALIDATION_ERROR, "field 'id' is required")
//!     .with_component(ComponentInfo::new("ibmcloud-db2saas", "0.1.0"));
//! assert_eq!(err.code(), "struct-validation-error");
//! ```
//!
//! ## ErrorSeverity Levels
//!
//! | Level | Use Case | Examples |
//! |-------|----------|----------|
//! | **Info** | Expected conditions | 404 from a lookup |
//! | **Warning** | Degraded but operational | Rate limiting, transient 5xx |
//! | **Error** | Failure requiring attention | Invalid input, config errors |
//! | **Critical** | SDK invariant broken | Response body no longer matches the model |

mod http;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use http::{extract_error_code, extract_error_message, HttpProblem};

/// Standard result type using [`SdkError`]
pub type SdkResult<T> = Result<T, SdkError>;

/// Machine-readable error codes
///
/// Codes are stable strings so callers can match on them across crate
/// versions.
pub mod codes {
    /// A required options value was missing entirely.
    pub const UNEXPECTED_NIL_PARAM: &str = "unexpected-nil-param";
    /// A required field was empty or otherwise invalid.
    pub const STRUCT_VALIDATION_ERROR: &str = "struct-validation-error";
    /// The request URL could not be resolved from its template.
    pub const URL_RESOLVE_ERROR: &str = "url-resolve-error";
    /// The request body could not be serialized to JSON.
    pub const SET_JSON_BODY_ERROR: &str = "set-json-body-error";
    /// The HTTP request could not be assembled.
    pub const BUILD_ERROR: &str = "build-error";
    /// Transport failure or non-2xx HTTP status.
    pub const HTTP_REQUEST_ERR: &str = "http-request-err";
    /// The response body did not decode into the result model.
    pub const UNMARSHAL_RESP_ERROR: &str = "unmarshal-resp-error";
    /// No usable authenticator could be built from external configuration.
    pub const ENV_AUTH_ERROR: &str = "env-auth-error";
    /// Client construction failed.
    pub const NEW_CLIENT_ERROR: &str = "new-client-error";
    /// The base service could not be constructed.
    pub const NEW_BASE_ERROR: &str = "new-base-error";
    /// External service configuration could not be applied.
    pub const CLIENT_CONFIG_ERROR: &str = "client-config-error";
    /// An explicit service URL was rejected after external configuration.
    pub const URL_SET_ERROR: &str = "url-set-error";
    /// An explicit service URL was rejected during construction.
    pub const SET_URL_ERROR: &str = "set-url-error";
    /// The service has no regional endpoints.
    pub const NO_REGIONAL_SUPPORT: &str = "no-regional-support";
    /// The authenticator failed to produce credentials.
    pub const AUTHENTICATION_ERROR: &str = "authentication-error";
    /// Configuration values were missing or malformed.
    pub const CONFIG_ERROR: &str = "config-error";
}

/// Coarse grouping of error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required values missing or invalid
    Validation,
    /// URL template or service URL problems
    Url,
    /// Request body encoding failures
    Serialization,
    /// Transport-level failures (connect, timeout, TLS)
    Request,
    /// The service answered with a non-2xx status
    Http,
    /// The response body did not match the model
    Deserialization,
    /// Credentials could not be obtained or applied
    Authentication,
    /// Client or service configuration problems
    Configuration,
}

impl ErrorKind {
    /// Stable lowercase name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Url => "url",
            Self::Serialization => "serialization",
            Self::Request => "request",
            Self::Http => "http",
            Self::Deserialization => "deserialization",
            Self::Authentication => "authentication",
            Self::Configuration => "configuration",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and version of the SDK component that raised an error
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Component name, e.g. `ibmcloud-db2saas`
    pub name: String,
    /// Component version
    pub version: String,
}

impl ComponentInfo {
    /// Create component info from a name and version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self { name: name.into(), version: version.into() }
    }
}

impl fmt::Display for ComponentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Error returned by every SDK operation
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct SdkError {
    kind: ErrorKind,
    code: &'static str,
    message: String,
    component: Option<ComponentInfo>,
    http: Option<HttpProblem>,
    #[source]
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl SdkError {
    /// Create an error with an explicit kind and code
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self { kind, code, message: message.into(), component: None, http: None, source: None }
    }

    /// Missing or invalid required values
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, code, message)
    }

    /// URL template or service URL problems
    pub fn url(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Url, code, message)
    }

    /// Request body serialization failure
    pub fn serialization(source: serde_json::Error) -> Self {
        Self::new(
            ErrorKind::Serialization,
            codes::SET_JSON_BODY_ERROR,
            format!("failed to serialize request body: {source}"),
        )
        .with_source(source)
    }

    /// Transport failure before any HTTP status was received
    pub fn request(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::new(ErrorKind::Request, codes::HTTP_REQUEST_ERR, message).with_source(source)
    }

    /// Non-2xx response from the service
    pub fn http(problem: HttpProblem) -> Self {
        let message = problem.message.clone();
        let mut err = Self::new(ErrorKind::Http, codes::HTTP_REQUEST_ERR, message);
        err.http = Some(problem);
        err
    }

    /// Response body did not decode into the expected model
    pub fn deserialization(source: serde_json::Error) -> Self {
        Self::new(
            ErrorKind::Deserialization,
            codes::UNMARSHAL_RESP_ERROR,
            format!("error unmarshalling response body: {source}"),
        )
        .with_source(source)
    }

    /// Credential acquisition failure
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, codes::AUTHENTICATION_ERROR, message)
    }

    /// Configuration problems
    pub fn configuration(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, code, message)
    }

    /// Attach the component that raised or wrapped this error
    #[must_use]
    pub fn with_component(mut self, component: ComponentInfo) -> Self {
        self.component = Some(component);
        self
    }

    /// Re-label the error with a new code, keeping message and source
    ///
    /// Used when a lower layer's error surfaces from a higher-level step,
    /// e.g. a base-service URL error reported as `url-set-error`.
    #[must_use]
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }

    /// Attach the underlying error
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        let source: Arc<dyn std::error::Error + Send + Sync> = Arc::new(source);
        self.source = Some(source);
        self
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Coarse error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Component that raised or last wrapped the error
    pub fn component(&self) -> Option<&ComponentInfo> {
        self.component.as_ref()
    }

    /// HTTP details when the service answered with a non-2xx status
    pub fn http_problem(&self) -> Option<&HttpProblem> {
        self.http.as_ref()
    }

    /// HTTP status code, if any
    pub fn status_code(&self) -> Option<u16> {
        self.http.as_ref().map(|problem| problem.status_code)
    }

    /// Convert error to structured logging fields
    ///
    /// Returns key-value pairs suitable for structured logging.
    pub fn as_tracing_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("error_kind", self.kind.as_str().to_string()),
            ("error_code", self.code.to_string()),
            ("message", self.message.clone()),
        ];
        if let Some(component) = &self.component {
            fields.push(("component", component.to_string()));
        }
        if let Some(problem) = &self.http {
            fields.push(("status_code", problem.status_code.to_string()));
            fields.push(("operation_id", problem.operation_id.clone()));
            if let Some(code) = &problem.error_code {
                fields.push(("service_error_code", code.clone()));
            }
        }
        fields
    }

    /// Emit this error as a single structured tracing event
    #[cfg(feature = "observability")]
    pub fn trace(&self) {
        match self.severity() {
            ErrorSeverity::Info => tracing::debug!(
                code = self.code,
                kind = %self.kind,
                status = ?self.status_code(),
                "{}",
                self.message
            ),
            ErrorSeverity::Warning => tracing::warn!(
                code = self.code,
                kind = %self.kind,
                status = ?self.status_code(),
                "{}",
                self.message
            ),
            ErrorSeverity::Error | ErrorSeverity::Critical => tracing::error!(
                code = self.code,
                kind = %self.kind,
                status = ?self.status_code(),
                "{}",
                self.message
            ),
        }
    }
}

impl ErrorClassification for SdkError {
    fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Request => true,
            ErrorKind::Http => self
                .status_code()
                .is_some_and(|status| status == 429 || (status >= 500 && status != 501)),
            _ => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self.kind {
            ErrorKind::Http => match self.status_code() {
                Some(404) => ErrorSeverity::Info,
                Some(status) if status == 429 || status >= 500 => ErrorSeverity::Warning,
                _ => ErrorSeverity::Error,
            },
            ErrorKind::Request => ErrorSeverity::Warning,
            ErrorKind::Deserialization => ErrorSeverity::Critical,
            ErrorKind::Validation
            | ErrorKind::Url
            | ErrorKind::Serialization
            | ErrorKind::Authentication
            | ErrorKind::Configuration => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    fn retry_after(&self) -> Option<Duration> {
        self.http.as_ref().and_then(|problem| problem.retry_after)
    }
}

/// Error classification trait for consistent error handling
///
/// # Example
///
/// ```rust
/// use ibmcloud_common::error::{ErrorClassification, ErrorSeverity, SdkError};
///
/// fn should_page(err: &SdkError) -> bool {
///     err.is_critical() || err.severity() >= ErrorSeverity::Error
/// }
/// ```
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient issues that may succeed if attempted
    /// again: transport failures, rate limiting, 5xx responses other than
    /// 501.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if the service supplied one
    fn retry_after(&self) -> Option<Duration>;
}

/// Unified severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Informational, expected condition
    Info,
    /// Degraded but operational
    Warning,
    /// Failure requiring attention
    Error,
    /// SDK invariant broken
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(status: u16) -> HttpProblem {
        HttpProblem {
            status_code: status,
            operation_id: "get_policy".to_string(),
            message: "boom".to_string(),
            error_code: None,
            body: None,
            service: None,
            retry_after: None,
        }
    }

    #[test]
    fn test_codes_survive_wrapping() {
        let err = SdkError::url(codes::URL_RESOLVE_ERROR, "service URL is empty")
            .with_component(ComponentInfo::new("ibmcloud-iam-policy", "0.1.0"));

        assert_eq!(err.code(), "url-resolve-error");
        assert_eq!(err.kind(), ErrorKind::Url);
        assert_eq!(err.component().map(|c| c.name.as_str()), Some("ibmcloud-iam-policy"));
        assert_eq!(err.to_string(), "service URL is empty");

        let relabeled = err.with_code(codes::URL_SET_ERROR);
        assert_eq!(relabeled.code(), "url-set-error");
        assert_eq!(relabeled.message(), "service URL is empty");
    }

    #[test]
    fn test_http_errors_classify_by_status() {
        assert!(SdkError::http(problem(503)).is_retryable());
        assert!(SdkError::http(problem(429)).is_retryable());
        assert!(!SdkError::http(problem(501)).is_retryable());
        assert!(!SdkError::http(problem(400)).is_retryable());

        assert_eq!(SdkError::http(problem(404)).severity(), ErrorSeverity::Info);
        assert_eq!(SdkError::http(problem(500)).severity(), ErrorSeverity::Warning);
        assert_eq!(SdkError::http(problem(409)).severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_deserialization_is_critical() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = SdkError::deserialization(source);

        assert_eq!(err.code(), codes::UNMARSHAL_RESP_ERROR);
        assert!(err.is_critical());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_tracing_fields_include_http_details() {
        let mut http = problem(412);
        http.error_code = Some("policy_conflict_error".to_string());
        let fields = SdkError::http(http).as_tracing_fields();

        assert!(fields.contains(&("error_code", "http-request-err".to_string())));
        assert!(fields.contains(&("status_code", "412".to_string())));
        assert!(fields.contains(&("service_error_code", "policy_conflict_error".to_string())));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
    }
}
