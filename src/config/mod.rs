//! Configuration types for the Storm API client.
//!
//! This module provides the connection settings used to authenticate against
//! the identity server and to call the commerce API.
//!
//! # Overview
//!
//! - [`StormConfig`]: The immutable set of connection parameters
//! - [`StormConfigBuilder`]: A builder for constructing [`StormConfig`] instances
//! - [`ApiUrl`], [`IdentityUrl`]: Validated base URLs
//! - [`ApplicationId`], [`ClientId`], [`ClientSecret`]: Validated credentials
//!
//! # Example
//!
//! ```rust
//! use storm_api::{ApiUrl, ApplicationId, ClientId, ClientSecret, IdentityUrl, StormConfig};
//!
//! let config = StormConfig::builder()
//!     .application_id(ApplicationId::new("1234").unwrap())
//!     .api_url(ApiUrl::new("https://api.example.com/api/1.1/").unwrap())
//!     .identity_url(IdentityUrl::new("https://identity.example.com/").unwrap())
//!     .client_id(ClientId::new("client").unwrap())
//!     .client_secret(ClientSecret::new("secret").unwrap())
//!     .environment("stage")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.environment(), "stage");
//! ```

mod newtypes;

pub use newtypes::{ApiUrl, ApplicationId, ClientId, ClientSecret, IdentityUrl};

use crate::error::ConfigError;

/// Environment variable holding the application id.
pub const ENV_APPLICATION_ID: &str = "STORM_APPLICATION_ID";
/// Environment variable holding the commerce API base URL.
pub const ENV_API_URL: &str = "STORM_API_URL";
/// Environment variable holding the identity server base URL.
pub const ENV_IDENTITY_URL: &str = "STORM_IDENTITY_URL";
/// Environment variable holding the OAuth client id.
pub const ENV_CLIENT_ID: &str = "STORM_OAUTH_CLIENT_ID";
/// Environment variable holding the OAuth client secret.
pub const ENV_CLIENT_SECRET: &str = "STORM_OAUTH_CLIENT_SECRET";
/// Environment variable holding the environment, used as the OAuth scope.
pub const ENV_ENVIRONMENT: &str = "STORM_ENVIRONMENT";

/// Connection settings for the Storm commerce API.
///
/// The configuration is read once and never changes afterwards. It is
/// `Clone`, `Send`, and `Sync`.
///
/// The `environment` value doubles as the OAuth scope requested from the
/// identity server.
#[derive(Clone, Debug)]
pub struct StormConfig {
    application_id: ApplicationId,
    api_url: ApiUrl,
    identity_url: IdentityUrl,
    client_id: ClientId,
    client_secret: ClientSecret,
    environment: String,
    user_agent_prefix: Option<String>,
}

impl StormConfig {
    /// Creates a new builder for constructing a `StormConfig`.
    #[must_use]
    pub fn builder() -> StormConfigBuilder {
        StormConfigBuilder::new()
    }

    /// Loads the configuration from `STORM_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if a variable is unset, or the
    /// validation error of the offending value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// Keys are the `ENV_*` constants of this module.
    ///
    /// # Errors
    ///
    /// Same as [`StormConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| lookup(name).ok_or(ConfigError::MissingEnvVar { name });

        Self::builder()
            .application_id(ApplicationId::new(require(ENV_APPLICATION_ID)?)?)
            .api_url(ApiUrl::new(require(ENV_API_URL)?)?)
            .identity_url(IdentityUrl::new(require(ENV_IDENTITY_URL)?)?)
            .client_id(ClientId::new(require(ENV_CLIENT_ID)?)?)
            .client_secret(ClientSecret::new(require(ENV_CLIENT_SECRET)?)?)
            .environment(require(ENV_ENVIRONMENT)?)
            .build()
    }

    /// Returns the application id.
    #[must_use]
    pub const fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    /// Returns the commerce API base URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the identity server base URL.
    #[must_use]
    pub const fn identity_url(&self) -> &IdentityUrl {
        &self.identity_url
    }

    /// Returns the OAuth client id.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the OAuth client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the environment name, which is also the OAuth scope.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify StormConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StormConfig>();
};

/// Builder for constructing [`StormConfig`] instances.
///
/// All fields except `user_agent_prefix` are required.
#[derive(Debug, Default)]
pub struct StormConfigBuilder {
    application_id: Option<ApplicationId>,
    api_url: Option<ApiUrl>,
    identity_url: Option<IdentityUrl>,
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    environment: Option<String>,
    user_agent_prefix: Option<String>,
}

impl StormConfigBuilder {
    /// Creates a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application id (required).
    #[must_use]
    pub fn application_id(mut self, id: ApplicationId) -> Self {
        self.application_id = Some(id);
        self
    }

    /// Sets the commerce API base URL (required).
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the identity server base URL (required).
    #[must_use]
    pub fn identity_url(mut self, url: IdentityUrl) -> Self {
        self.identity_url = Some(url);
        self
    }

    /// Sets the OAuth client id (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the OAuth client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the environment name used as OAuth scope (required).
    #[must_use]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`StormConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] naming the first unset field.
    pub fn build(self) -> Result<StormConfig, ConfigError> {
        let missing = |field| ConfigError::MissingRequiredField { field };

        Ok(StormConfig {
            application_id: self.application_id.ok_or_else(|| missing("application_id"))?,
            api_url: self.api_url.ok_or_else(|| missing("api_url"))?,
            identity_url: self.identity_url.ok_or_else(|| missing("identity_url"))?,
            client_id: self.client_id.ok_or_else(|| missing("client_id"))?,
            client_secret: self.client_secret.ok_or_else(|| missing("client_secret"))?,
            environment: self.environment.ok_or_else(|| missing("environment"))?,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
