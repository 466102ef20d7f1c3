use std::time::Duration;

use ibmcloud_common::error::{codes, ErrorKind, SdkError, SdkResult};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

/// Retry settings applied by [`HttpClient`] when retries are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: usize,
    /// Upper bound for any single delay, including `Retry-After`.
    pub max_retry_interval: Duration,
    /// Delay before the first retry; doubled for each subsequent one.
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 4,
            max_retry_interval: Duration::from_secs(30),
            base_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Policy with the given limits; zero values fall back to the defaults.
    pub fn new(max_retries: usize, max_retry_interval: Duration) -> Self {
        let defaults = Self::default();
        Self {
            max_retries: if max_retries == 0 { defaults.max_retries } else { max_retries },
            max_retry_interval: if max_retry_interval.is_zero() {
                defaults.max_retry_interval
            } else {
                max_retry_interval
            },
            base_backoff: defaults.base_backoff,
        }
    }

    /// Delay before the first retry.
    #[must_use]
    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = u32::try_from(retry_number.saturating_sub(1)).unwrap_or(u32::MAX).min(8);
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier).min(self.max_retry_interval)
    }

    fn delay_for(&self, retry_number: usize, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(delay) => delay.min(self.max_retry_interval),
            None => self.backoff_delay(retry_number),
        }
    }
}

/// HTTP client with timeout and optional retry support.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    retry: Option<RetryPolicy>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> SdkResult<Self> {
        Self::builder().build()
    }

    /// Same transport with a different retry policy.
    #[must_use]
    pub fn with_retry_policy(&self, retry: Option<RetryPolicy>) -> Self {
        Self { client: self.client.clone(), retry }
    }

    /// Active retry policy, if retries are enabled.
    pub fn retry_policy(&self) -> Option<&RetryPolicy> {
        self.retry.as_ref()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder, retrying when a policy is set.
    ///
    /// Only non-2xx statuses in the retryable set trigger another attempt;
    /// everything else is handed back to the caller untouched.
    pub async fn send(&self, builder: RequestBuilder) -> SdkResult<Response> {
        let attempts = self.retry.map_or(1, |policy| policy.max_retries + 1);

        for attempt in 0..attempts {
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                SdkError::new(
                    ErrorKind::Request,
                    codes::BUILD_ERROR,
                    "request body cannot be cloned; buffer the body to enable retries",
                )
            })?;

            let request = cloned_builder.build().map_err(|err| {
                SdkError::new(ErrorKind::Request, codes::BUILD_ERROR, err.to_string())
                    .with_source(err)
            })?;

            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt = attempt + 1, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %url, %status, "received HTTP response");

                    if attempt + 1 < attempts && should_retry_status(status) {
                        self.sleep_before_retry(attempt + 1, retry_after(response.headers())).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, %method, %url, error = %err, "HTTP request failed");

                    if attempt + 1 < attempts && should_retry_error(&err) {
                        self.sleep_before_retry(attempt + 1, None).await;
                        continue;
                    }

                    return Err(SdkError::request(format!("HTTP request failed: {err}"), err));
                }
            }
        }

        Err(SdkError::new(
            ErrorKind::Request,
            codes::HTTP_REQUEST_ERR,
            "http client exhausted retries without producing a result",
        ))
    }

    async fn sleep_before_retry(&self, retry_number: usize, retry_after: Option<Duration>) {
        let Some(policy) = self.retry else {
            return;
        };
        let delay = policy.delay_for(retry_number, retry_after);
        warn!(retry = retry_number, delay_ms = delay_millis(delay), "retrying HTTP request");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: Option<RetryPolicy>,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
    accept_invalid_certs: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry: None,
            user_agent: None,
            default_headers: None,
            accept_invalid_certs: false,
        }
    }
}

impl HttpClientBuilder {
    /// Per-attempt timeout; 30 s by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable retries with the given policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// `User-Agent` sent with every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Headers sent with every request.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Skip TLS certificate verification (`DISABLE_SSL`).
    pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// `new-base-error` when the TLS backend cannot be initialised.
    pub fn build(self) -> SdkResult<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|err| {
            SdkError::configuration(codes::NEW_BASE_ERROR, format!("failed to build HTTP client: {err}"))
                .with_source(err)
        })?;

        Ok(HttpClient { client, retry: self.retry })
    }
}

/// Whole milliseconds of `delay`, saturating at `u64::MAX`.
fn delay_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

fn should_retry_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED)
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    if err.is_timeout() || err.is_request() {
        return true;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if err.is_connect() {
            return true;
        }
    }
    false
}

/// `Retry-After` in whole seconds.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use reqwest::{Method, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_with_retries(max_retries: usize) -> HttpClient {
        HttpClient::builder()
            .retry_policy(
                RetryPolicy::new(max_retries, Duration::from_secs(1))
                    .base_backoff(Duration::from_millis(10)),
            )
            .build()
            .expect("http client")
    }

    #[tokio::test]
    async fn returns_successful_response_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_retries(2);
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn retries_server_errors_until_success() {
        let server = MockServer::start().await;
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        Mock::given(method("GET"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                let current = attempts_clone.fetch_add(1, Ordering::SeqCst);
                if current < 2 {
                    ResponseTemplate::new(503)
                } else {
                    ResponseTemplate::new(200)
                }
            })
            .expect(3)
            .mount(&server)
            .await;

        let client = client_with_retries(3);
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retries_rate_limits_honouring_retry_after() {
        let server = MockServer::start().await;
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        Mock::given(method("GET"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                if attempts_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                    ResponseTemplate::new(429).insert_header("Retry-After", "0")
                } else {
                    ResponseTemplate::new(200)
                }
            })
            .expect(2)
            .mount(&server)
            .await;

        let client = client_with_retries(1);
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn does_not_retry_without_policy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().expect("http client");
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn does_not_retry_not_implemented_or_client_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(501))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_retries(3);
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn retries_on_network_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED
        let url = format!("http://{}", addr);

        let client = client_with_retries(1);

        let err = client.send(client.request(Method::GET, &url)).await.unwrap_err();
        assert_eq!(err.code(), codes::HTTP_REQUEST_ERR);
        assert_eq!(err.kind(), ErrorKind::Request);
    }

    #[test]
    fn backoff_is_capped_by_max_interval() {
        let policy = RetryPolicy::new(10, Duration::from_secs(5)).base_backoff(Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(4));
        assert_eq!(policy.backoff_delay(6), Duration::from_secs(5));
        assert_eq!(policy.delay_for(1, Some(Duration::from_secs(60))), Duration::from_secs(5));
        assert_eq!(policy.backoff_delay(usize::MAX), Duration::from_secs(5));
    }

    #[test]
    fn delay_millis_saturates_instead_of_truncating() {
        assert_eq!(delay_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(delay_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn zero_values_use_defaults() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy, RetryPolicy::default());
    }
}
