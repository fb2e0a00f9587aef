//! Error types for client configuration.
//!
//! This module contains the error type returned when configuration values
//! or validated newtypes are rejected.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use odata_client::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The service root URL is not an absolute http(s) URL.
    #[error("Invalid service root '{url}'. Expected an absolute URL such as 'https://outlook.office365.com/api/v1.0'.")]
    InvalidServiceRoot {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Omit the token entirely for anonymous services.")]
    EmptyAccessToken,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The default page size must be positive.
    #[error("Invalid default page size {size}. The page size must be greater than zero.")]
    InvalidPageSize {
        /// The rejected size.
        size: u32,
    },
}
