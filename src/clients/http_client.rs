//! Authenticated client for the Storm commerce API.
//!
//! This module provides the [`StormClient`] type, which runs every call
//! through the same pipeline: obtain a token, send, classify, decode.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::oauth::TokenProvider;
use crate::auth::TokenCache;
use crate::clients::errors::StormError;
use crate::clients::http_request::{prepare_url, to_json_body, HttpMethod};
use crate::clients::http_response::{check_response, decode_body, reason_phrase};
use crate::config::StormConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the Storm application id.
pub const APPLICATION_ID_HEADER: &str = "applicationId";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for the Storm commerce REST API.
///
/// The client handles:
/// - Bearer token acquisition and caching via [`TokenProvider`]
/// - URL normalization (base URL, `format=json`)
/// - The `applicationId` and `Authorization` headers
/// - Status classification into [`StormError`] variants
///
/// Requests are never retried.
///
/// # Thread Safety
///
/// `StormClient` is `Send + Sync`. The underlying `reqwest::Client` pools
/// connections, so create one `StormClient` (or one `reqwest::Client` passed
/// to [`StormClient::with_http_client`]) and share it.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use storm_api::{MemoryTokenCache, ProductList, StormClient, StormConfig};
///
/// let config = StormConfig::from_env()?;
/// let client = StormClient::new(config, Arc::new(MemoryTokenCache::new()))?;
///
/// let list: ProductList = client.get("Products/ListProducts2?pageSize=10").await?;
/// println!("{} products", list.product_count);
/// ```
#[derive(Debug)]
pub struct StormClient {
    /// The shared reqwest HTTP client.
    client: reqwest::Client,
    /// Connection settings.
    config: StormConfig,
    /// Token source, sharing `client`.
    tokens: TokenProvider,
    /// Value of the `User-Agent` header.
    user_agent: String,
}

// Verify StormClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StormClient>();
};

impl StormClient {
    /// Creates a client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`StormError::Network`] if the HTTP client cannot be created
    /// (e.g. TLS initialization failure).
    pub fn new(config: StormConfig, cache: Arc<dyn TokenCache>) -> Result<Self, StormError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_http_client(config, cache, client))
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    ///
    /// Timeouts, proxies, and other transport settings are taken from `client`.
    #[must_use]
    pub fn with_http_client(
        config: StormConfig,
        cache: Arc<dyn TokenCache>,
        client: reqwest::Client,
    ) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Storm API Client v{SDK_VERSION} | Rust {rust_version}");

        let tokens = TokenProvider::new(client.clone(), cache);

        Self {
            client,
            config,
            tokens,
            user_agent,
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &StormConfig {
        &self.config
    }

    /// Returns the token provider used by this client.
    #[must_use]
    pub const fn token_provider(&self) -> &TokenProvider {
        &self.tokens
    }

    /// Returns the `User-Agent` header value sent with each request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Resolves `path` against the configured API URL.
    ///
    /// See [`prepare_url`](crate::clients::prepare_url).
    #[must_use]
    pub fn prepare_url(&self, path: &str) -> String {
        prepare_url(self.config.api_url().as_ref(), path)
    }

    /// Sends a GET request and decodes the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`StormError`] if authentication fails, the request fails,
    /// the status is not a success, the body is empty, or decoding fails.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, StormError> {
        self.send(HttpMethod::Get, path, None).await
    }

    /// Sends a POST request with an empty JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`StormClient::get`].
    pub async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, StormError> {
        self.send(HttpMethod::Post, path, Some(String::new())).await
    }

    /// Sends a POST request with `body` serialized as JSON.
    ///
    /// Object fields whose value is `null` are left out of the payload.
    ///
    /// # Errors
    ///
    /// Returns [`StormError::Serialize`] if `body` cannot be serialized,
    /// otherwise the same errors as [`StormClient::get`].
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, StormError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_json_body(body)?;
        self.send(HttpMethod::Post, path, Some(body)).await
    }

    /// Form-encoded POST. Not supported by this client.
    ///
    /// # Errors
    ///
    /// Always returns [`StormError::NotSupported`].
    #[allow(clippy::unused_async)]
    pub async fn form_post<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &HashMap<String, String>,
    ) -> Result<T, StormError> {
        tracing::debug!(
            "Rejecting form post to {} with {} fields",
            path,
            form.len()
        );
        Err(StormError::NotSupported {
            operation: "form_post",
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<T, StormError> {
        let url = self.prepare_url(path);
        let token = self
            .tokens
            .get_access_token(
                self.config.identity_url(),
                self.config.client_id(),
                self.config.client_secret(),
                self.config.environment(),
            )
            .await?;

        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        req_builder = req_builder
            .bearer_auth(token)
            .header(APPLICATION_ID_HEADER, self.config.application_id().as_ref())
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(USER_AGENT, &self.user_agent);

        if let Some(body) = body {
            req_builder = req_builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        tracing::debug!("Sending {} request to {}", method, path);
        let res = req_builder.send().await?;

        let status = res.status();
        let reason = reason_phrase(&res);
        let body_text = if status.is_success() {
            res.text().await?
        } else {
            // The status alone classifies a failed call.
            res.text().await.unwrap_or_else(|e| {
                tracing::debug!("Could not read {} error body: {}", status.as_u16(), e);
                String::new()
            })
        };

        if let Err(e) = check_response(status, &reason, &body_text) {
            tracing::debug!("{} {} failed: {}", method, path, e);
            return Err(e);
        }

        decode_body(&body_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenCache;
    use crate::config::{ApiUrl, ApplicationId, ClientId, ClientSecret, IdentityUrl};

    fn create_test_config(prefix: Option<&str>) -> StormConfig {
        let mut builder = StormConfig::builder()
            .application_id(ApplicationId::new("1234").unwrap())
            .api_url(ApiUrl::new("https://api.example.com/api/1.1/").unwrap())
            .identity_url(IdentityUrl::new("https://identity.example.com/").unwrap())
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .environment("stage");
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    fn create_test_client(prefix: Option<&str>) -> StormClient {
        StormClient::with_http_client(
            create_test_config(prefix),
            Arc::new(MemoryTokenCache::new()),
            reqwest::Client::new(),
        )
    }

    #[test]
    fn test_prepare_url_uses_configured_api_url() {
        let client = create_test_client(None);
        assert_eq!(
            client.prepare_url("Products/ListProducts2"),
            "https://api.example.com/api/1.1/Products/ListProducts2?format=json"
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = create_test_client(None);
        assert!(client.user_agent().starts_with("Storm API Client v"));
        assert!(client.user_agent().contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client = create_test_client(Some("MyShop/2.0"));
        assert!(client.user_agent().starts_with("MyShop/2.0 | Storm API Client"));
    }

    #[test]
    fn test_client_exposes_config() {
        let client = create_test_client(None);
        assert_eq!(client.config().application_id().as_ref(), "1234");
    }

    #[test]
    fn test_new_builds_own_transport() {
        let client = StormClient::new(create_test_config(None), Arc::new(MemoryTokenCache::new()));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_form_post_is_not_supported() {
        let client = create_test_client(None);
        let form = HashMap::from([("key".to_string(), "value".to_string())]);

        let result: Result<serde_json::Value, _> = client.form_post("Orders/Submit", &form).await;

        assert!(matches!(
            result,
            Err(StormError::NotSupported {
                operation: "form_post"
            })
        ));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StormClient>();
    }
}
