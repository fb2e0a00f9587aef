//! The transport seam between the query core and the network.

use std::future::Future;
use std::pin::Pin;

use crate::clients::{HttpError, HttpMethod};

/// A boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Executes fully composed requests against a remote service.
///
/// Implementations own connection handling, TLS, authentication headers,
/// timeouts and any retry policy. The core hands over the composed path
/// (relative to the service root, query string included), an optional
/// serialized body and the verb, and expects the raw response body back.
///
/// A transport is shared read-only by every in-flight request of a tree,
/// so it must be `Send + Sync`.
///
/// # Example
///
/// ```rust
/// use odata_client::clients::{HttpError, HttpMethod};
/// use odata_client::odata::{BoxFuture, Transport};
///
/// struct Canned(&'static str);
///
/// impl Transport for Canned {
///     fn execute(
///         &self,
///         _path: String,
///         _body: Option<Vec<u8>>,
///         _method: HttpMethod,
///     ) -> BoxFuture<'_, Result<Vec<u8>, HttpError>> {
///         let payload = self.0.as_bytes().to_vec();
///         Box::pin(async move { Ok(payload) })
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends one request and resolves to the response body.
    ///
    /// `body` is `None` for GET and DELETE.
    fn execute(
        &self,
        path: String,
        body: Option<Vec<u8>>,
        method: HttpMethod,
    ) -> BoxFuture<'_, Result<Vec<u8>, HttpError>>;
}
