//! Configuration types for the OData client.
//!
//! This module provides the configuration used to construct the HTTP
//! transport and the mail client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ODataConfig`]: The main configuration struct holding all client settings
//! - [`ODataConfigBuilder`]: A builder for constructing [`ODataConfig`] instances
//! - [`ServiceRoot`]: A validated service root URL
//! - [`AccessToken`]: A bearer token with masked debug output
//!
//! # Example
//!
//! ```rust
//! use odata_client::{ODataConfig, ServiceRoot, AccessToken};
//!
//! let config = ODataConfig::builder()
//!     .service_root(ServiceRoot::new("https://outlook.office365.com/api/v1.0").unwrap())
//!     .access_token(AccessToken::new("token").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ServiceRoot};

use std::time::Duration;

use crate::error::ConfigError;

/// Default number of items requested by list operations that do not set `top`.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Configuration for the OData client.
///
/// # Thread Safety
///
/// `ODataConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use odata_client::{ODataConfig, ServiceRoot};
///
/// let config = ODataConfig::builder()
///     .service_root(ServiceRoot::new("https://example.com/odata").unwrap())
///     .max_tries(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_tries(), 3);
/// assert!(config.access_token().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ODataConfig {
    service_root: ServiceRoot,
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
    max_tries: u32,
    timeout: Option<Duration>,
    default_page_size: u32,
}

impl ODataConfig {
    /// Creates a new builder for constructing an `ODataConfig`.
    #[must_use]
    pub fn builder() -> ODataConfigBuilder {
        ODataConfigBuilder::new()
    }

    /// Returns the service root.
    #[must_use]
    pub const fn service_root(&self) -> &ServiceRoot {
        &self.service_root
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many times the HTTP transport attempts a request.
    ///
    /// A value of 1 disables retries.
    #[must_use]
    pub const fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the page size used by list operations that do not set `top`.
    #[must_use]
    pub const fn default_page_size(&self) -> u32 {
        self.default_page_size
    }
}

// Verify ODataConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ODataConfig>();
};

/// Builder for constructing [`ODataConfig`] instances.
///
/// The only required field is `service_root`.
///
/// # Defaults
///
/// - `access_token`: `None`
/// - `user_agent_prefix`: `None`
/// - `max_tries`: 1 (no retries)
/// - `timeout`: `None`
/// - `default_page_size`: [`DEFAULT_PAGE_SIZE`]
#[derive(Debug, Default)]
pub struct ODataConfigBuilder {
    service_root: Option<ServiceRoot>,
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
    max_tries: Option<u32>,
    timeout: Option<Duration>,
    default_page_size: Option<u32>,
}

impl ODataConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service root (required).
    #[must_use]
    pub fn service_root(mut self, root: ServiceRoot) -> Self {
        self.service_root = Some(root);
        self
    }

    /// Sets the bearer token sent with every request.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets how many times the transport attempts a throttled request.
    ///
    /// Values below 1 are treated as 1.
    #[must_use]
    pub const fn max_tries(mut self, tries: u32) -> Self {
        self.max_tries = Some(tries);
        self
    }

    /// Sets the per-request timeout enforced by the HTTP transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the page size used by list operations that do not set `top`.
    #[must_use]
    pub const fn default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = Some(size);
        self
    }

    /// Builds the [`ODataConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `service_root` is not
    /// set, or [`ConfigError::InvalidPageSize`] if the page size is zero.
    pub fn build(self) -> Result<ODataConfig, ConfigError> {
        let service_root = self.service_root.ok_or(ConfigError::MissingRequiredField {
            field: "service_root",
        })?;

        let default_page_size = self.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if default_page_size == 0 {
            return Err(ConfigError::InvalidPageSize {
                size: default_page_size,
            });
        }

        Ok(ODataConfig {
            service_root,
            access_token: self.access_token,
            user_agent_prefix: self.user_agent_prefix,
            max_tries: self.max_tries.unwrap_or(1).max(1),
            timeout: self.timeout,
            default_page_size,
        })
    }
}
