//! Error types for OData query construction and execution.
//!
//! # Error Handling
//!
//! Failures fall into two groups that callers can tell apart:
//!
//! - **Synchronous**: [`ODataError::InvalidArgument`] and
//!   [`ODataError::MissingRegistration`] are returned directly from the call
//!   that builds the request (for example
//!   [`ODataCollection::get_by_key`](crate::odata::ODataCollection::get_by_key)),
//!   before any request exists.
//! - **Asynchronous**: everything else surfaces when the returned future is
//!   awaited. HTTP 404 maps to [`ODataError::NotFound`]; other transport
//!   failures pass through unchanged as [`ODataError::Transport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use odata_client::odata::ODataError;
//!
//! match client.get_message("Inbox", "AAMk=").await {
//!     Ok(message) => println!("{:?}", message.subject),
//!     Err(ODataError::NotFound { path, .. }) => println!("nothing at {path}"),
//!     Err(ODataError::InvalidArgument { argument, .. }) => println!("bad {argument}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::odata::codec::CodecError;

/// Error type for OData operations.
#[derive(Debug, Error)]
pub enum ODataError {
    /// A required argument was empty or otherwise unusable.
    ///
    /// Raised synchronously; no request was built or sent.
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// The name of the offending argument.
        argument: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The service reported that the addressed resource does not exist (HTTP 404).
    #[error("Resource not found at '{path}': {message}")]
    NotFound {
        /// The composed request path.
        path: String,
        /// The service's error message.
        message: String,
        /// The request ID for debugging (from the `request-id` header).
        request_id: Option<String>,
    },

    /// The transport failed; the underlying error is passed through unchanged.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// A response payload could not be decoded into the expected entity type.
    #[error("Failed to decode {entity} response: {source}")]
    Decode {
        /// The entity type name.
        entity: &'static str,
        /// The codec failure.
        #[source]
        source: CodecError,
    },

    /// An entity or action payload could not be encoded.
    #[error("Failed to encode {entity} request body: {source}")]
    Encode {
        /// The entity type name.
        entity: &'static str,
        /// The codec failure.
        #[source]
        source: CodecError,
    },

    /// No single-item query is registered for an entity type.
    ///
    /// This is an internal configuration error of the client, not a caller
    /// mistake.
    #[error("Internal configuration error: no single-item query registered for entity type '{entity}'")]
    MissingRegistration {
        /// The entity type name.
        entity: &'static str,
    },
}

impl ODataError {
    /// Creates an [`ODataError::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Maps a transport failure for the request at `path`.
    ///
    /// - 404 -> `NotFound`
    /// - Other -> `Transport`
    #[must_use]
    pub fn from_transport(error: HttpError, path: String) -> Self {
        match error {
            HttpError::Response(response) if response.code == 404 => Self::NotFound {
                path,
                message: response.message,
                request_id: response.error_reference,
            },
            other => Self::Transport(other),
        }
    }

    /// Returns `true` for failures raised before any request was issued.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::MissingRegistration { .. }
        )
    }
}

/// Rejects empty or whitespace-only required string arguments.
pub(crate) fn require_non_empty(argument: &'static str, value: &str) -> Result<(), ODataError> {
    if value.trim().is_empty() {
        return Err(ODataError::invalid_argument(argument, "must not be empty"));
    }
    Ok(())
}

// Verify ODataError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ODataError>();
};
