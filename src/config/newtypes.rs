//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated OData service root URL.
///
/// The service root is the absolute URL every request path is appended to
/// (for example `https://outlook.office365.com/api/v1.0`). A trailing `/`
/// is trimmed so that paths can always be joined with a single separator.
///
/// # Example
///
/// ```rust
/// use odata_client::ServiceRoot;
///
/// let root = ServiceRoot::new("https://outlook.office365.com/api/v1.0/").unwrap();
/// assert_eq!(root.as_ref(), "https://outlook.office365.com/api/v1.0");
/// assert_eq!(root.scheme(), "https");
/// assert_eq!(root.host_name(), "outlook.office365.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceRoot {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ServiceRoot {
    /// Creates a new validated service root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidServiceRoot`] if the URL has no
    /// `http`/`https` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidServiceRoot { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(ConfigError::InvalidServiceRoot { url });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidServiceRoot { url });
        }

        // Query strings belong to individual requests, never to the root.
        if url[host_end..].contains(['?', '#']) {
            return Err(ConfigError::InvalidServiceRoot { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins a request path onto the service root.
    ///
    /// ```rust
    /// use odata_client::ServiceRoot;
    ///
    /// let root = ServiceRoot::new("https://example.com/api").unwrap();
    /// assert_eq!(root.join("Me/Messages"), "https://example.com/api/Me/Messages");
    /// assert_eq!(root.join("/Me"), "https://example.com/api/Me");
    /// ```
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.url.clone()
        } else {
            format!("{}/{path}", self.url)
        }
    }
}

impl AsRef<str> for ServiceRoot {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ServiceRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for ServiceRoot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for ServiceRoot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A bearer access token presented to the service.
///
/// Acquiring and refreshing tokens is the caller's concern; this type only
/// carries an already issued token. The `Debug` implementation masks the
/// value to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use odata_client::AccessToken;
///
/// let token = AccessToken::new("eyJ0eXAi").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }

    /// Returns the value for an `Authorization` header.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_root_trims_trailing_slash() {
        let root = ServiceRoot::new("https://outlook.office365.com/api/v1.0/").unwrap();
        assert_eq!(root.as_ref(), "https://outlook.office365.com/api/v1.0");
    }

    #[test]
    fn test_service_root_parses_scheme_and_host() {
        let root = ServiceRoot::new("http://localhost:8080/odata").unwrap();
        assert_eq!(root.scheme(), "http");
        assert_eq!(root.host_name(), "localhost");
    }

    #[test]
    fn test_service_root_rejects_invalid() {
        assert!(ServiceRoot::new("").is_err());
        assert!(ServiceRoot::new("outlook.office365.com").is_err());
        assert!(ServiceRoot::new("ftp://example.com").is_err());
        assert!(ServiceRoot::new("https://").is_err());
        assert!(ServiceRoot::new("https://example.com/api?$top=1").is_err());
    }

    #[test]
    fn test_service_root_join() {
        let root = ServiceRoot::new("https://example.com/api").unwrap();
        assert_eq!(
            root.join("Me/Messages?&$top=1"),
            "https://example.com/api/Me/Messages?&$top=1"
        );
        assert_eq!(root.join(""), "https://example.com/api");
    }

    #[test]
    fn test_service_root_round_trip_serialization() {
        let original = ServiceRoot::new("https://example.com/api").unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, r#""https://example.com/api""#);
        let restored: ServiceRoot = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_service_root_deserialize_rejects_invalid() {
        let result: Result<ServiceRoot, _> = serde_json::from_str(r#""nope""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_access_token_rejects_empty_string() {
        assert!(matches!(
            AccessToken::new(""),
            Err(ConfigError::EmptyAccessToken)
        ));
        assert!(matches!(
            AccessToken::new("   "),
            Err(ConfigError::EmptyAccessToken)
        ));
    }

    #[test]
    fn test_access_token_masks_value_in_debug() {
        let token = AccessToken::new("super-secret-token").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "AccessToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_access_token_bearer_header() {
        let token = AccessToken::new("abc").unwrap();
        assert_eq!(token.bearer_header(), "Bearer abc");
    }
}
