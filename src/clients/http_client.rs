//! HTTP transport for OData services.
//!
//! This module provides the [`HttpClient`] type, the reqwest-backed
//! [`Transport`] used by default to reach a remote service.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{DataType, HttpMethod, HttpRequest};
use crate::config::{ODataConfig, ServiceRoot};
use crate::odata::{BoxFuture, Transport};

/// Fixed retry wait time in seconds when no `Retry-After` header is present.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to an OData service.
///
/// The client handles:
/// - URL construction from the configured service root
/// - Default headers including User-Agent, Accept and the bearer token
/// - Retry logic for throttled (429) and unavailable (503) responses
/// - Extraction of OData error messages from failed responses
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use odata_client::{ODataConfig, ServiceRoot};
/// use odata_client::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = ODataConfig::builder()
///     .service_root(ServiceRoot::new("https://outlook.office365.com/api/v1.0").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config);
/// let request = HttpRequest::builder(HttpMethod::Get, "Me/Folders").build().unwrap();
/// let bytes = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    service_root: ServiceRoot,
    default_headers: HashMap<String, String>,
    max_tries: u32,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &ODataConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}OData Client Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if let Some(token) = config.access_token() {
            default_headers.insert("Authorization".to_string(), token.bearer_header());
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self {
            client,
            service_root: config.service_root().clone(),
            default_headers,
            max_tries: config.max_tries(),
        }
    }

    /// Returns the service root requests are sent to.
    #[must_use]
    pub const fn service_root(&self) -> &ServiceRoot {
        &self.service_root
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns how many times a throttled request is attempted.
    #[must_use]
    pub const fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Sends an HTTP request and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error or timeout occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<Vec<u8>, HttpError> {
        request.verify()?;

        let url = self.service_root.join(&request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = self
                .client
                .request(Self::to_reqwest_method(request.http_method), &url);

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.clone());
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let request_id = Self::request_id(res.headers());
            let retry_after = Self::retry_after(res.headers());
            let body = res.bytes().await?.to_vec();

            if (200..300).contains(&code) {
                return Ok(body);
            }

            let message = Self::error_message(&body, code);

            let should_retry = code == 429 || code == 503;
            if !should_retry {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message,
                    error_reference: request_id,
                }));
            }

            if tries >= request.tries {
                if request.tries <= 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message,
                        error_reference: request_id,
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message,
                    error_reference: request_id,
                }));
            }

            let delay = retry_after.unwrap_or_else(|| Duration::from_secs(RETRY_WAIT_TIME));
            tracing::warn!(
                "Request to {} returned {}, retrying in {:?} (attempt {} of {})",
                request.path,
                code,
                delay,
                tries + 1,
                request.tries
            );
            tokio::time::sleep(delay).await;
        }
    }

    const fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    fn request_id(headers: &reqwest::header::HeaderMap) -> Option<String> {
        ["request-id", "client-request-id"]
            .iter()
            .find_map(|name| headers.get(*name))
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
    }

    fn retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
        headers
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Extracts the OData error message from a failed response body.
    fn error_message(body: &[u8], code: u16) -> String {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
            let message = value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|message| {
                    // OData v3 nests the text one level deeper
                    message
                        .as_str()
                        .or_else(|| message.get("value").and_then(|v| v.as_str()))
                });
            if let Some(message) = message {
                return message.to_string();
            }
        }

        let text = String::from_utf8_lossy(body).trim().to_string();
        if text.is_empty() {
            format!("Request failed with status {code}")
        } else {
            text
        }
    }
}

impl Transport for HttpClient {
    fn execute(
        &self,
        path: String,
        body: Option<Vec<u8>>,
        method: HttpMethod,
    ) -> BoxFuture<'_, Result<Vec<u8>, HttpError>> {
        Box::pin(async move {
            let mut builder = HttpRequest::builder(method, path).tries(self.max_tries);
            if let Some(body) = body {
                builder = builder.body(body).body_type(DataType::Json);
            }
            let request = builder.build()?;
            self.request(request).await
        })
    }
}
