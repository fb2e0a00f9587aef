//! HTTP transport types for OData service communication.
//!
//! This module provides the default [`Transport`](crate::odata::Transport)
//! implementation used to reach a remote service over HTTPS.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async reqwest-backed transport
//! - [`HttpRequest`]: A request to be sent to the service
//! - [`HttpMethod`]: Supported HTTP verbs (GET, POST, PATCH, DELETE)
//! - [`DataType`]: Content types for request bodies
//! - [`HttpError`]: Unified transport failure type
//!
//! # Retry Behavior
//!
//! The client retries transient failures when configured with
//! [`ODataConfigBuilder::max_tries`](crate::ODataConfigBuilder::max_tries):
//!
//! - **429 (Throttled)** and **503 (Unavailable)**: Retries using the
//!   `Retry-After` header value, or 1 second if not present
//! - **Other errors**: Returns immediately without retry
//!
//! The OData core itself never retries; this policy belongs to the transport.

mod errors;
mod http_client;
mod http_request;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
