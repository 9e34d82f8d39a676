//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// The Storm application id, sent as the `applicationId` header on every API call.
///
/// # Example
///
/// ```rust
/// use storm_api::ApplicationId;
///
/// let app_id = ApplicationId::new("1234").unwrap();
/// assert_eq!(app_id.as_ref(), "1234");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Creates a new validated application id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApplicationId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyApplicationId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ApplicationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated OAuth client id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated OAuth client secret.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ClientSecret(*****)` instead of the actual secret.
///
/// ```rust
/// use storm_api::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// The base URL of the Storm commerce API.
///
/// Relative request paths are appended to this value verbatim, so it should
/// normally end with a `/` (e.g. `https://api.example.com/api/1.1/`).
///
/// # Example
///
/// ```rust
/// use storm_api::ApiUrl;
///
/// let url = ApiUrl::new("https://api.example.com/api/1.1/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com/api/1.1/");
/// assert!(ApiUrl::new("api.example.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl(String);

impl ApiUrl {
    /// Creates a new validated API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();
        validate_url("API URL", &url)?;
        Ok(Self(url))
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The base URL of the OAuth identity server.
///
/// The token endpoint is resolved as `{identity_url}connect/token`, so the
/// value is normalized to always end with `/`.
///
/// # Example
///
/// ```rust
/// use storm_api::IdentityUrl;
///
/// let url = IdentityUrl::new("https://identity.example.com").unwrap();
/// assert_eq!(url.as_ref(), "https://identity.example.com/");
/// assert_eq!(url.token_endpoint(), "https://identity.example.com/connect/token");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityUrl(String);

impl IdentityUrl {
    /// Creates a new validated identity URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let mut url = url.into().trim().to_string();
        validate_url("identity URL", &url)?;
        if !url.ends_with('/') {
            url.push('/');
        }
        Ok(Self(url))
    }

    /// Returns the OAuth token endpoint for this identity server.
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        format!("{}connect/token", self.0)
    }
}

impl AsRef<str> for IdentityUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn validate_url(kind: &'static str, url: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        kind,
        url: url.to_string(),
    };

    let scheme_end = url.find("://").ok_or_else(invalid)?;
    let scheme = &url[..scheme_end];
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }

    // Host ends at port, path, query, or end of string
    let remainder = &url[scheme_end + 3..];
    let host_end = remainder.find([':', '/', '?', '#']).unwrap_or(remainder.len());
    if remainder[..host_end].is_empty() {
        return Err(invalid());
    }

    Ok(())
}
