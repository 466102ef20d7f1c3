//! HTTP error details and IBM error envelope parsing

use std::time::Duration;

use serde_json::Value;

/// Details of a non-2xx response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProblem {
    /// HTTP status code
    pub status_code: u16,
    /// Snake-case operation id, e.g. `post_db2_saas_user`
    pub operation_id: String,
    /// Message extracted from the error envelope
    pub message: String,
    /// Service error code from the envelope, if present
    pub error_code: Option<String>,
    /// Raw response body
    pub body: Option<String>,
    /// Service name the request was sent to
    pub service: Option<String>,
    /// Delay requested via `Retry-After`
    pub retry_after: Option<Duration>,
}

impl HttpProblem {
    /// Build a problem from a status and raw response body
    ///
    /// The message is taken from the body's error envelope when one is
    /// recognised, otherwise from `fallback` (usually the status reason).
    pub fn from_response(
        status_code: u16,
        operation_id: impl Into<String>,
        body: Option<String>,
        fallback: &str,
    ) -> Self {
        let parsed = body.as_deref().and_then(|raw| serde_json::from_str::<Value>(raw).ok());
        let message = parsed
            .as_ref()
            .and_then(extract_error_message)
            .unwrap_or_else(|| fallback.to_string());
        let error_code = parsed.as_ref().and_then(extract_error_code);

        Self {
            status_code,
            operation_id: operation_id.into(),
            message,
            error_code,
            body: body.filter(|raw| !raw.is_empty()),
            service: None,
            retry_after: None,
        }
    }

    /// Set the service the failing request belonged to
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Set the `Retry-After` delay
    #[must_use]
    pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
        self.retry_after = retry_after;
        self
    }
}

/// Pull a human-readable message out of an IBM error envelope
///
/// Checked in order: `errors[0].message`, `error`, `message`, `errorMessage`.
pub fn extract_error_message(body: &Value) -> Option<String> {
    if let Some(message) = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|first| first.get("message"))
        .and_then(Value::as_str)
    {
        return Some(message.to_string());
    }

    ["error", "message", "errorMessage"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Pull the service error code out of an IBM error envelope
pub fn extract_error_code(body: &Value) -> Option<String> {
    if let Some(code) = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|first| first.get("code"))
        .and_then(Value::as_str)
    {
        return Some(code.to_string());
    }

    ["code", "errorCode"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_message_prefers_errors_array() {
        let body = json!({
            "errors": [{"code": "not_found", "message": "Policy was not found."}],
            "error": "ignored",
        });
        assert_eq!(extract_error_message(&body).as_deref(), Some("Policy was not found."));
        assert_eq!(extract_error_code(&body).as_deref(), Some("not_found"));
    }

    #[test]
    fn test_message_falls_back_through_keys() {
        assert_eq!(extract_error_message(&json!({"error": "bad"})).as_deref(), Some("bad"));
        assert_eq!(extract_error_message(&json!({"message": "m"})).as_deref(), Some("m"));
        assert_eq!(extract_error_message(&json!({"errorMessage": "em"})).as_deref(), Some("em"));
        assert_eq!(extract_error_message(&json!({"status": 500})), None);
    }

    #[test]
    fn test_from_response_uses_fallback_for_non_json() {
        let problem = HttpProblem::from_response(
            502,
            "get_db2_saas_backup",
            Some("<html>bad gateway</html>".to_string()),
            "Bad Gateway",
        );
        assert_eq!(problem.message, "Bad Gateway");
        assert_eq!(problem.error_code, None);
        assert_eq!(problem.body.as_deref(), Some("<html>bad gateway</html>"));
    }
}
