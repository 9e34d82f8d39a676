//! OAuth 2.0 Client Credentials Grant against the Storm identity server.
//!
//! The commerce API only accepts bearer tokens issued to the integration
//! itself; there is no user context. Tokens are fetched on demand and kept in
//! a [`TokenCache`] until shortly before they expire.
//!
//! # Token lifecycle
//!
//! 1. [`TokenProvider::get_access_token`] looks up [`ACCESS_TOKEN_KEY`].
//! 2. On a miss it POSTs a form-encoded request to `{identity_url}connect/token`.
//! 3. The response is cached until `expires_in - 10` seconds from now.
//!
//! Concurrent misses are not coalesced: each caller may exchange its own
//! token and the last write wins. Exchanges have no side effects beyond
//! issuing a new valid token.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storm_api::auth::oauth::TokenProvider;
//! use storm_api::auth::MemoryTokenCache;
//!
//! let provider = TokenProvider::new(reqwest::Client::new(), Arc::new(MemoryTokenCache::new()));
//! let token = provider
//!     .get_access_token(config.identity_url(), config.client_id(), config.client_secret(), "stage")
//!     .await?;
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{Duration, Utc};
use reqwest::header::CONTENT_TYPE;

use crate::auth::cache::{TokenCache, ACCESS_TOKEN_KEY};
use crate::auth::oauth::AuthError;
use crate::auth::CachedToken;
use crate::config::{ClientId, ClientSecret, IdentityUrl};

/// Grant type for client credentials.
pub const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// Seconds subtracted from `expires_in` so a token is refreshed before it expires.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Hands out bearer tokens, fetching and caching them as needed.
///
/// Cloning is cheap: the HTTP client and the cache are shared.
#[derive(Clone)]
pub struct TokenProvider {
    client: reqwest::Client,
    cache: Arc<dyn TokenCache>,
}

impl TokenProvider {
    /// Creates a provider using the given HTTP client and cache.
    #[must_use]
    pub fn new(client: reqwest::Client, cache: Arc<dyn TokenCache>) -> Self {
        Self { client, cache }
    }

    /// Returns a valid access token, exchanging client credentials on a cache miss.
    ///
    /// # Errors
    ///
    /// - [`AuthError::TokenRequestFailed`] if the identity server is
    ///   unreachable or answers with a non-success status
    /// - [`AuthError::InvalidTokenResponse`] if the response is not a token
    pub async fn get_access_token(
        &self,
        identity_url: &IdentityUrl,
        client_id: &ClientId,
        client_secret: &ClientSecret,
        scope: &str,
    ) -> Result<String, AuthError> {
        if let Some(token) = self.cache.get(ACCESS_TOKEN_KEY) {
            tracing::debug!("Using cached access token");
            return Ok(token.access_token);
        }

        tracing::debug!("No cached access token, requesting a new one for scope {}", scope);
        let token =
            exchange_client_credentials(&self.client, identity_url, client_id, client_secret, scope)
                .await?;

        let ttl = token.expires_in - EXPIRY_MARGIN_SECS;
        match Duration::try_seconds(ttl).and_then(|ttl| Utc::now().checked_add_signed(ttl)) {
            Some(expires_at) if ttl > 0 => {
                self.cache.insert(ACCESS_TOKEN_KEY, token.clone(), expires_at);
            }
            _ => tracing::debug!(
                "Access token lifetime of {}s is too short to cache",
                token.expires_in
            ),
        }

        Ok(token.access_token)
    }

    /// Drops the cached token so the next call exchanges a new one.
    pub fn invalidate(&self) {
        self.cache.remove(ACCESS_TOKEN_KEY);
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider").finish_non_exhaustive()
    }
}

/// Exchanges client credentials for an access token, bypassing the cache.
///
/// # Errors
///
/// Same as [`TokenProvider::get_access_token`].
pub async fn exchange_client_credentials(
    client: &reqwest::Client,
    identity_url: &IdentityUrl,
    client_id: &ClientId,
    client_secret: &ClientSecret,
    scope: &str,
) -> Result<CachedToken, AuthError> {
    let body = build_request_body(client_id, client_secret, scope);

    let response = client
        .post(identity_url.token_endpoint())
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(body)
        .send()
        .await
        .map_err(|e| AuthError::TokenRequestFailed {
            status: 0,
            message: format!("Network error: {e}"),
        })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AuthError::TokenRequestFailed {
            status: status.as_u16(),
            message: format!("Failed to read token response: {e}"),
        })?;

    if !status.is_success() {
        tracing::warn!("Token request rejected with status {}", status.as_u16());
        return Err(AuthError::TokenRequestFailed {
            status: status.as_u16(),
            message: text,
        });
    }

    serde_json::from_str(&text).map_err(|e| AuthError::InvalidTokenResponse {
        message: e.to_string(),
    })
}

fn build_request_body(client_id: &ClientId, client_secret: &ClientSecret, scope: &str) -> String {
    format!(
        "client_id={}&client_secret={}&grant_type={}&scope={}",
        urlencoding::encode(client_id.as_ref()),
        urlencoding::encode(client_secret.as_ref()),
        CLIENT_CREDENTIALS_GRANT_TYPE,
        urlencoding::encode(scope),
    )
}

// Verify TokenProvider is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenProvider>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenCache;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> (ClientId, ClientSecret) {
        (
            ClientId::new("test-client").unwrap(),
            ClientSecret::new("s3cret&more").unwrap(),
        )
    }

    fn token_json(value: &str, expires_in: i64) -> serde_json::Value {
        serde_json::json!({
            "access_token": value,
            "expires_in": expires_in,
            "token_type": "Bearer",
            "scope": "stage"
        })
    }

    #[test]
    fn test_request_body_is_form_encoded() {
        let (client_id, client_secret) = credentials();
        let body = build_request_body(&client_id, &client_secret, "stage env");

        assert_eq!(
            body,
            "client_id=test-client&client_secret=s3cret%26more&grant_type=client_credentials&scope=stage%20env"
        );
    }

    #[tokio::test]
    async fn test_exchange_posts_form_to_connect_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .and(header("content-type", FORM_CONTENT_TYPE))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("scope=stage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_json("fresh", 3600)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let identity_url = IdentityUrl::new(mock_server.uri()).unwrap();
        let (client_id, client_secret) = credentials();

        let token = exchange_client_credentials(
            &reqwest::Client::new(),
            &identity_url,
            &client_id,
            &client_secret,
            "stage",
        )
        .await
        .unwrap();

        assert_eq!(token.access_token, "fresh");
        assert_eq!(token.expires_in, 3600);
    }

    #[tokio::test]
    async fn test_exchange_rejection_maps_to_token_request_failed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
            .mount(&mock_server)
            .await;

        let identity_url = IdentityUrl::new(mock_server.uri()).unwrap();
        let (client_id, client_secret) = credentials();

        let result = exchange_client_credentials(
            &reqwest::Client::new(),
            &identity_url,
            &client_id,
            &client_secret,
            "stage",
        )
        .await;

        match result {
            Err(AuthError::TokenRequestFailed { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid_client");
            }
            other => panic!("Expected TokenRequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_exchange_rejects_malformed_token_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let identity_url = IdentityUrl::new(mock_server.uri()).unwrap();
        let (client_id, client_secret) = credentials();

        let result = exchange_client_credentials(
            &reqwest::Client::new(),
            &identity_url,
            &client_id,
            &client_secret,
            "stage",
        )
        .await;

        assert!(matches!(result, Err(AuthError::InvalidTokenResponse { .. })));
    }

    #[tokio::test]
    async fn test_short_lived_token_is_returned_but_not_cached() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_json("brief", 10)))
            .expect(2)
            .mount(&mock_server)
            .await;

        let cache = Arc::new(MemoryTokenCache::new());
        let provider = TokenProvider::new(reqwest::Client::new(), cache.clone());
        let identity_url = IdentityUrl::new(mock_server.uri()).unwrap();
        let (client_id, client_secret) = credentials();

        for _ in 0..2 {
            let token = provider
                .get_access_token(&identity_url, &client_id, &client_secret, "stage")
                .await
                .unwrap();
            assert_eq!(token, "brief");
        }
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_forces_new_exchange() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_json("t", 3600)))
            .expect(2)
            .mount(&mock_server)
            .await;

        let provider =
            TokenProvider::new(reqwest::Client::new(), Arc::new(MemoryTokenCache::new()));
        let identity_url = IdentityUrl::new(mock_server.uri()).unwrap();
        let (client_id, client_secret) = credentials();

        provider
            .get_access_token(&identity_url, &client_id, &client_secret, "stage")
            .await
            .unwrap();
        provider.invalidate();
        provider
            .get_access_token(&identity_url, &client_id, &client_secret, "stage")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_expired_cached_token_triggers_exchange() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_json("renewed", 3600)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let cache = Arc::new(MemoryTokenCache::new());
        cache.insert(
            ACCESS_TOKEN_KEY,
            CachedToken {
                access_token: "stale".to_string(),
                expires_in: 3600,
                token_type: "Bearer".to_string(),
                scope: "stage".to_string(),
            },
            Utc::now() - Duration::seconds(1),
        );
        let provider = TokenProvider::new(reqwest::Client::new(), cache.clone());
        let identity_url = IdentityUrl::new(mock_server.uri()).unwrap();
        let (client_id, client_secret) = credentials();

        for _ in 0..2 {
            let token = provider
                .get_access_token(&identity_url, &client_id, &client_secret, "stage")
                .await
                .unwrap();
            assert_eq!(token, "renewed");
        }
        assert_eq!(cache.get(ACCESS_TOKEN_KEY).unwrap().access_token, "renewed");
    }

    #[test]
    fn test_grant_type_constant() {
        assert_eq!(CLIENT_CREDENTIALS_GRANT_TYPE, "client_credentials");
        assert_eq!(EXPIRY_MARGIN_SECS, 10);
    }
}
